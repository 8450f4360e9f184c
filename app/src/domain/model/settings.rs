use crate::error::*;
use serde::*;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

// Anything other than "asc" sorts descending.
impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D>(deserializer: D) -> std::result::Result<SortOrder, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else {
            Ok(SortOrder::Desc)
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

// Thresholds are plain integers; a negative minimum filters nothing.
fn non_negative<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.max(0) as u64)
}

fn default_since_minutes() -> i64 {
    60
}

fn default_max_results() -> i64 {
    50
}

fn default_sort_by() -> String {
    "likeCount".to_string()
}

fn default_output_file() -> PathBuf {
    PathBuf::from("data/sample_output.json")
}

/// Run settings, read from `settings.json` (or one of its fallbacks).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default = "default_since_minutes")]
    pub since_minutes: i64,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub lang: Option<String>,
    #[serde(default)]
    pub only_verified_users: bool,
    #[serde(default)]
    pub only_twitter_blue: bool,
    #[serde(default, deserialize_with = "non_negative")]
    pub min_like_count: u64,
    #[serde(default, deserialize_with = "non_negative")]
    pub min_retweet_count: u64,
    #[serde(default, deserialize_with = "non_negative")]
    pub min_reply_count: u64,
    #[serde(default, deserialize_with = "non_negative")]
    pub min_view_count: u64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(GeneralError::invalid_input(anyhow::anyhow!(
                "no cashtag symbols configured, add at least one symbol to the settings file"
            )));
        }
        Ok(())
    }

    /// The recent search endpoint accepts 10 to 100 results per page.
    pub fn clamped_max_results(&self) -> u32 {
        self.max_results.clamp(10, 100) as u32
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            symbols: Vec::new(),
            since_minutes: default_since_minutes(),
            max_results: default_max_results(),
            lang: None,
            only_verified_users: false,
            only_twitter_blue: false,
            min_like_count: 0,
            min_retweet_count: 0,
            min_reply_count: 0,
            min_view_count: 0,
            sort_by: default_sort_by(),
            sort_order: SortOrder::default(),
            output_file: default_output_file(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TwitterCredentials {
    #[serde(default, rename = "bearerToken")]
    pub bearer_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub twitter: TwitterCredentials,
}

impl Credentials {
    pub fn from_bearer_token(token: impl Into<String>) -> Self {
        Credentials {
            twitter: TwitterCredentials {
                bearer_token: Some(token.into()),
            },
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.twitter
            .bearer_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
