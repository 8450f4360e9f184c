use super::TweetID;
use serde::*;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Bullish => "BULLISH",
            Sentiment::Bearish => "BEARISH",
            Sentiment::Neutral => "NEUTRAL",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Tweet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub user_name: String,
    pub name: Option<String>,
    pub is_verified: bool,
    pub followers: u64,
}

impl Author {
    /// The search API exposes no subscription signal, so "blue" status is
    /// approximated by the legacy verification flag.
    pub fn is_blue(&self) -> bool {
        self.is_verified
    }
}

impl Default for Author {
    fn default() -> Self {
        Author {
            user_name: "unknown".to_string(),
            name: None,
            is_verified: false,
            followers: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotedTweet {
    pub id: TweetID,
    pub text: String,
}

/// A normalized post, the unit that flows through classification,
/// filtering, sorting and the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub id: TweetID,
    pub url: Option<String>,
    pub text: String,
    pub sentiment: Sentiment,
    pub retweet_count: u64,
    pub reply_count: u64,
    pub like_count: u64,
    pub view_count: u64,
    pub created_at: Option<String>,
    pub lang: Option<String>,
    pub author: Author,
    pub quote: Option<QuotedTweet>,
}

impl Tweet {
    /// Numeric value of the named output field, used as a sort key.
    /// String fields are parsed as numbers; anything that is not a finite
    /// number (or not a top-level field at all) counts as `0.0`.
    pub fn sort_key(&self, field: &str) -> f64 {
        let text_key = |value: Option<&str>| {
            value
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
        };

        match field {
            "likeCount" => self.like_count as f64,
            "retweetCount" => self.retweet_count as f64,
            "replyCount" => self.reply_count as f64,
            "viewCount" => self.view_count as f64,
            "id" => text_key(Some(self.id.0.as_str())),
            "text" => text_key(Some(self.text.as_str())),
            "url" => text_key(self.url.as_deref()),
            "createdAt" => text_key(self.created_at.as_deref()),
            "lang" => text_key(self.lang.as_deref()),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
impl Tweet {
    pub fn sample(id: &str) -> Tweet {
        Tweet {
            kind: PostKind::Tweet,
            id: TweetID::from(id),
            url: Some(format!("https://x.com/unknown/status/{}", id)),
            text: String::new(),
            sentiment: Sentiment::Neutral,
            retweet_count: 0,
            reply_count: 0,
            like_count: 0,
            view_count: 0,
            created_at: None,
            lang: None,
            author: Author::default(),
            quote: None,
        }
    }
}
