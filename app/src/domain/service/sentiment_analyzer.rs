use crate::domain::model::Sentiment;
use regex::Regex;
use std::sync::OnceLock;
use vader_sentiment::SentimentIntensityAnalyzer;

const BULLISH_THRESHOLD: f64 = 0.25;
const BEARISH_THRESHOLD: f64 = -0.25;

static BULLISH_REGEX: OnceLock<Regex> = OnceLock::new();
static BEARISH_REGEX: OnceLock<Regex> = OnceLock::new();

fn bullish_regex() -> &'static Regex {
    BULLISH_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)\b(call|calls|long|buy|bought|adding|accumulating|moon|pump|bull|bullish|breakout|rally)\b",
        )
        .unwrap()
    })
}

fn bearish_regex() -> &'static Regex {
    BEARISH_REGEX.get_or_init(|| {
        Regex::new(r"(?i)\b(put|puts|short|sell|sold|dump|bear|bearish|crash|collapse|rug)\b")
            .unwrap()
    })
}

/// Labels posts BULLISH, BEARISH or NEUTRAL from the VADER compound score,
/// with trading vocabulary able to force either side on.
pub struct SentimentAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound polarity in `[-1, 1]`.
    pub fn compound(&self, text: &str) -> f64 {
        let scores = self.analyzer.polarity_scores(text);
        scores.get("compound").copied().unwrap_or(0.0)
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        let text = text.trim();
        if text.is_empty() {
            return Sentiment::Neutral;
        }

        let compound = self.compound(text);
        let mut bullish = compound >= BULLISH_THRESHOLD;
        let mut bearish = compound <= BEARISH_THRESHOLD;

        // keywords can only switch a side on
        if bullish_regex().is_match(text) {
            bullish = true;
        }
        if bearish_regex().is_match(text) {
            bearish = true;
        }

        let label = match (bullish, bearish) {
            (true, false) => Sentiment::Bullish,
            (false, true) => Sentiment::Bearish,
            _ => Sentiment::Neutral,
        };

        tracing::debug!(compound, %label, text, "classified sentiment");
        label
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
