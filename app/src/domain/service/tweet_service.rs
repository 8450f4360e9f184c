use crate::domain::interface::*;
use crate::domain::model::*;
use crate::domain::service::*;
use crate::error::*;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum MonitorOutcome {
    /// The search returned nothing, so no file was written.
    NoTweets,
    Written {
        path: PathBuf,
        summary: SentimentSummary,
    },
}

#[derive(Clone)]
pub struct TweetService {
    tweet_repo: Arc<dyn ITweetRepository + Send + Sync>,
    tweet_sink: Arc<dyn ITweetSink + Send + Sync>,
    analyzer: Arc<SentimentAnalyzer>,
}

impl TweetService {
    pub fn new(
        tweet_repo: Arc<dyn ITweetRepository + Send + Sync>,
        tweet_sink: Arc<dyn ITweetSink + Send + Sync>,
        analyzer: Arc<SentimentAnalyzer>,
    ) -> Self {
        Self {
            tweet_repo,
            tweet_sink,
            analyzer,
        }
    }

    pub async fn search_cashtags(
        &self,
        settings: &Settings,
        now: DateTime<Utc>,
    ) -> Result<Vec<Tweet>> {
        let query = build_cashtag_query(settings.symbols.as_slice())?;
        let request = SearchRequest::from_settings(query, settings, now)?;
        self.tweet_repo.search_cashtags(&request).await
    }

    pub fn classify(&self, tweets: Vec<Tweet>) -> Vec<Tweet> {
        tweets
            .into_iter()
            .map(|mut tweet| {
                tweet.sentiment = self.analyzer.classify(&tweet.text);
                tweet
            })
            .collect()
    }

    pub fn rank(&self, tweets: &[Tweet], settings: &Settings) -> Vec<Tweet> {
        let filtered = apply_all_filters(tweets, &FilterCriteria::from(settings));
        sort_tweets(&filtered, &settings.sort_by, settings.sort_order)
    }

    pub async fn save_tweets(&self, path: &Path, tweets: &[Tweet]) -> Result<()> {
        self.tweet_sink.save_tweets(path, tweets).await
    }

    /// One full run: search, classify, filter, sort and write to `output`.
    pub async fn monitor(
        &self,
        settings: &Settings,
        output: &Path,
        now: DateTime<Utc>,
    ) -> Result<MonitorOutcome> {
        tracing::info!(
            symbols = %settings.symbols.join(", "),
            since_minutes = settings.since_minutes,
            lang = settings.lang.as_deref().unwrap_or("any"),
            "fetching tweets"
        );

        let tweets = self.search_cashtags(settings, now).await?;
        if tweets.is_empty() {
            tracing::warn!("no tweets returned by the API");
            return Ok(MonitorOutcome::NoTweets);
        }

        let classified = self.classify(tweets);
        let ranked = self.rank(&classified, settings);
        tracing::info!(
            fetched = classified.len(),
            kept = ranked.len(),
            sort_by = %settings.sort_by,
            "filtered tweets"
        );

        self.save_tweets(output, &ranked).await?;
        tracing::info!(count = ranked.len(), path = %output.display(), "wrote tweets");

        Ok(MonitorOutcome::Written {
            path: output.to_path_buf(),
            summary: SentimentSummary::from_tweets(&ranked),
        })
    }
}
