use serde::*;
use std::fmt;
use std::hash::Hash;

#[derive(Clone, Debug, PartialEq, Default, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetID(pub String);

impl TweetID {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TweetID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// TweetID to String
impl From<TweetID> for String {
    fn from(tweet_id: TweetID) -> Self {
        tweet_id.0
    }
}

// String to TweetID
impl From<String> for TweetID {
    fn from(tweet_id: String) -> Self {
        TweetID(tweet_id)
    }
}

impl From<&str> for TweetID {
    fn from(tweet_id: &str) -> Self {
        TweetID(tweet_id.to_string())
    }
}
