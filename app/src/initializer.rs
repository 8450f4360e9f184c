use crate::domain::service;
use crate::error::Result;
use crate::infra;
use crate::repository;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Config {
    pub bearer_token: String,
    pub search_url: String,
}

#[derive(Clone)]
pub struct Infras {
    pub http_client: Arc<infra::HttpClient>,
    pub bearer_token: String,
    pub search_url: String,
}

pub fn infras(config: &Config) -> Result<Infras> {
    let http_client = Arc::new(infra::HttpClient::new()?);
    Ok(Infras {
        http_client,
        bearer_token: config.bearer_token.clone(),
        search_url: config.search_url.clone(),
    })
}

#[derive(Clone)]
pub struct Repository {
    pub tweet: Arc<repository::TweetRepository>,
    pub tweet_file: Arc<repository::TweetFileRepository>,
}

pub fn repository(infras: &Infras) -> Repository {
    let tweet = Arc::new(repository::TweetRepository::new(
        infras.http_client.clone(),
        infras.bearer_token.clone(),
        infras.search_url.clone(),
    ));
    let tweet_file = Arc::new(repository::TweetFileRepository::new());
    Repository { tweet, tweet_file }
}

#[derive(Clone)]
pub struct Services {
    pub tweet: service::TweetService,
}

#[derive(Clone)]
pub struct AppContext {
    pub services: Services,
}

pub fn new(config: Config) -> Result<AppContext> {
    let infras = infras(&config)?;
    let repository = repository(&infras);
    let services = Services {
        tweet: service::TweetService::new(
            repository.tweet.clone(),
            repository.tweet_file.clone(),
            Arc::new(service::SentimentAnalyzer::new()),
        ),
    };
    Ok(AppContext { services })
}
