use super::{Sentiment, Tweet};
use owo_colors::OwoColorize;
use std::fmt;

/// Per-label tally of a finished run, printed to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SentimentSummary {
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
}

impl SentimentSummary {
    pub fn from_tweets(tweets: &[Tweet]) -> Self {
        tweets
            .iter()
            .fold(SentimentSummary::default(), |mut acc, tweet| {
                match tweet.sentiment {
                    Sentiment::Bullish => acc.bullish += 1,
                    Sentiment::Bearish => acc.bearish += 1,
                    Sentiment::Neutral => acc.neutral += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.bullish + self.bearish + self.neutral
    }
}

impl fmt::Display for SentimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}  {} {}  {} {}  (total {})",
            "▲ BULLISH".green().bold(),
            self.bullish,
            "▼ BEARISH".red().bold(),
            self.bearish,
            "■ NEUTRAL".yellow(),
            self.neutral,
            self.total()
        )
    }
}
