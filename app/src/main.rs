// Search X/Twitter for cashtags, label each post BULLISH/BEARISH/NEUTRAL and
// write the filtered, ranked posts to a JSON file.
mod wrapper;
pub use wrapper::*;

use chrono::Utc;
use clap::{value_parser, Arg, Command};
use dotenv::dotenv;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod domain;
mod infra;
mod initializer;
mod repository;

use domain::service::MonitorOutcome;
use crate::error::Result;

fn cli() -> Command {
    Command::new("cashtagcli")
        .about("Fetch recent cashtag tweets, score their sentiment and save them as JSON")
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding settings.json and credentials.json")
                .value_parser(value_parser!(PathBuf))
                .default_value("config"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Write here instead of the configured outputFile")
                .value_parser(value_parser!(PathBuf)),
        )
}

async fn run(config_dir: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let loader = infra::ConfigLoader::new(config_dir);
    let settings = loader.load_settings()?;
    let bearer_token = loader.bearer_token(std::env::var(infra::BEARER_TOKEN_ENV).ok())?;

    let app = initializer::new(initializer::Config {
        bearer_token,
        search_url: repository::RECENT_SEARCH_URL.to_string(),
    })?;

    let output = output.unwrap_or_else(|| settings.output_file.clone());
    let outcome = app
        .services
        .tweet
        .monitor(&settings, &output, Utc::now())
        .await?;

    if let MonitorOutcome::Written { path, summary } = outcome {
        println!("{}", summary);
        println!("{} {}", "saved to".dimmed(), path.display());
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let matches = cli().get_matches();
    let config_dir = matches
        .get_one::<PathBuf>("config-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("config"));
    let output = matches.get_one::<PathBuf>("output").cloned();

    match run(config_dir, output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error_type = %err.error_type(), "{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
