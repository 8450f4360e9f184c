use super::Settings;
use crate::error::*;
use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// One recent-search call, derived from the run settings. `query` holds the
/// cashtag expression only; the language clause is added from `lang`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u32,
    pub lang: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub only_verified: bool,
    pub only_blue: bool,
}

impl SearchRequest {
    pub fn from_settings(query: String, settings: &Settings, now: DateTime<Utc>) -> Result<Self> {
        let start = Duration::try_minutes(settings.since_minutes)
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| {
                GeneralError::invalid_input(anyhow::anyhow!(
                    "sinceMinutes {} is out of range",
                    settings.since_minutes
                ))
            })?;
        Ok(SearchRequest {
            query,
            max_results: settings.clamped_max_results(),
            lang: settings.lang.clone(),
            start_time: Some(start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            end_time: None,
            only_verified: settings.only_verified_users,
            only_blue: settings.only_twitter_blue,
        })
    }
}
