use crate::domain::model::*;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait ITweetRepository {
    async fn search_cashtags(&self, request: &SearchRequest) -> Result<Vec<Tweet>>;
}

#[async_trait]
pub trait ITweetSink {
    async fn save_tweets(&self, path: &Path, tweets: &[Tweet]) -> Result<()>;
}

#[async_trait]
pub trait IHttpClient {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        header: Option<reqwest::header::HeaderMap>,
    ) -> Result<reqwest::Response>;
}
