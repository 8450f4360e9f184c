use crate::domain::interface::*;
use crate::error::*;
use async_trait::async_trait;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug)]
pub enum HttpClientError {
    FetchError,
}

impl IServiceError for HttpClientError {
    fn error_type(&self) -> String {
        use HttpClientError::*;

        match self {
            FetchError => "fetch_error",
        }
        .to_string()
    }

    fn exit_code(&self) -> u8 {
        use HttpClientError::*;

        match self {
            FetchError => 1,
        }
    }
}

// Transport failures, timeouts, non-2xx statuses and undecodable bodies all
// surface as a fetch error.
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> ServiceError {
        ServiceError::new(HttpClientError::FetchError, err)
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<HttpClient> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<HttpClient> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpClient { client })
    }
}

#[async_trait]
impl IHttpClient for HttpClient {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        header: Option<reqwest::header::HeaderMap>,
    ) -> Result<reqwest::Response> {
        let mut req = self.client.get(url).query(query);
        if let Some(h) = header {
            req = req.headers(h);
        }
        let resp = req.send().await?.error_for_status()?;

        Ok(resp)
    }
}
