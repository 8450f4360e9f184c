use super::SearchResponse;
use crate::domain::interface::*;
use crate::domain::model::*;
use crate::error::*;
use async_trait::async_trait;
use std::sync::Arc;

pub const RECENT_SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";

const TWEET_FIELDS: &str = "created_at,lang,public_metrics,referenced_tweets,author_id";
const EXPANSIONS: &str = "author_id,referenced_tweets.id";
const USER_FIELDS: &str = "name,username,verified,public_metrics";

#[derive(Debug)]
pub enum TweetRepoError {
    InvalidToken,
}

impl IServiceError for TweetRepoError {
    fn error_type(&self) -> String {
        use TweetRepoError::*;
        match self {
            InvalidToken => "invalid_credential",
        }
        .to_string()
    }

    fn exit_code(&self) -> u8 {
        use TweetRepoError::*;
        match self {
            InvalidToken => 2,
        }
    }
}

pub struct TweetRepository {
    http_client: Arc<dyn IHttpClient + Sync + Send>,
    bearer_token: String,
    base_url: String,
}

impl TweetRepository {
    pub fn new(
        http_client: Arc<dyn IHttpClient + Sync + Send>,
        bearer_token: String,
        base_url: String,
    ) -> Self {
        Self {
            http_client,
            bearer_token,
            base_url,
        }
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap> {
        let mut headers = reqwest::header::HeaderMap::new();
        let bearer_token = format!("Bearer {}", self.bearer_token);
        headers.insert(
            reqwest::header::AUTHORIZATION,
            bearer_token
                .parse()
                .map_err(|e| ServiceError::new(TweetRepoError::InvalidToken, e))?,
        );
        Ok(headers)
    }

    fn params(request: &SearchRequest) -> Vec<(&'static str, String)> {
        let query = match &request.lang {
            Some(lang) => format!("{} lang:{}", request.query, lang),
            None => request.query.clone(),
        };

        let mut params = vec![
            ("query", query),
            ("max_results", request.max_results.clamp(10, 100).to_string()),
            ("tweet.fields", TWEET_FIELDS.to_string()),
            ("expansions", EXPANSIONS.to_string()),
            ("user.fields", USER_FIELDS.to_string()),
        ];
        if let Some(start_time) = &request.start_time {
            params.push(("start_time", start_time.clone()));
        }
        if let Some(end_time) = &request.end_time {
            params.push(("end_time", end_time.clone()));
        }
        params
    }
}

#[async_trait]
impl ITweetRepository for TweetRepository {
    async fn search_cashtags(&self, request: &SearchRequest) -> Result<Vec<Tweet>> {
        let params = Self::params(request);
        tracing::debug!(?params, "requesting recent search");

        let response = self
            .http_client
            .get(&self.base_url, &params, Some(self.headers()?))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "error while calling Twitter API");
                e
            })?;
        let body = response.json::<SearchResponse>().await?;

        if let Some(meta) = &body.meta {
            tracing::debug!(
                result_count = ?meta.result_count,
                newest_id = ?meta.newest_id,
                oldest_id = ?meta.oldest_id,
                has_next_page = meta.next_token.is_some(),
                "recent search meta"
            );
        }

        let tweets = body.normalize(request.only_verified, request.only_blue);
        tracing::info!(count = tweets.len(), "fetched tweets from Twitter API");
        Ok(tweets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{HttpClient, HttpClientError};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(lang: Option<&str>) -> SearchRequest {
        SearchRequest {
            query: "(($BTC) OR ($ETH)) -is:retweet -is:reply".to_string(),
            max_results: 50,
            lang: lang.map(str::to_string),
            start_time: Some("2024-03-01T10:30:00Z".to_string()),
            end_time: None,
            only_verified: false,
            only_blue: false,
        }
    }

    fn repository(mock_server: &MockServer) -> TweetRepository {
        TweetRepository::new(
            Arc::new(HttpClient::new().unwrap()),
            "secret".to_string(),
            format!("{}/2/tweets/search/recent", mock_server.uri()),
        )
    }

    #[test]
    fn it_should_append_the_language_clause() {
        let params = TweetRepository::params(&request(Some("en")));
        assert_eq!(
            params[0],
            (
                "query",
                "(($BTC) OR ($ETH)) -is:retweet -is:reply lang:en".to_string()
            )
        );
        assert!(params.contains(&("start_time", "2024-03-01T10:30:00Z".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "end_time"));
    }

    #[test]
    fn it_should_clamp_max_results() {
        let mut req = request(None);
        req.max_results = 500;
        let params = TweetRepository::params(&req);
        assert!(params.contains(&("max_results", "100".to_string())));
    }

    #[test]
    fn it_should_reject_a_token_that_is_not_a_header_value() {
        let repo = TweetRepository::new(
            Arc::new(HttpClient::new().unwrap()),
            "bad\ntoken".to_string(),
            RECENT_SEARCH_URL.to_string(),
        );

        let err = repo.headers().unwrap_err();
        assert!(err.is_error_of(TweetRepoError::InvalidToken));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn it_should_fetch_and_normalize() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/2/tweets/search/recent"))
            .and(header("authorization", "Bearer secret"))
            .and(query_param(
                "query",
                "(($BTC) OR ($ETH)) -is:retweet -is:reply lang:en",
            ))
            .and(query_param("max_results", "50"))
            .and(query_param("expansions", "author_id,referenced_tweets.id"))
            .and(query_param("user.fields", "name,username,verified,public_metrics"))
            .and(query_param("start_time", "2024-03-01T10:30:00Z"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {
                        "id": "1",
                        "text": "$BTC rally",
                        "author_id": "u1",
                        "lang": "en",
                        "public_metrics": { "like_count": 20, "impression_count": 300 }
                    },
                    { "id": "2", "text": "$ETH", "author_id": "u2", "lang": "en" }
                ],
                "includes": {
                    "users": [
                        { "id": "u1", "username": "alice", "verified": true },
                        { "id": "u2", "username": "bob", "verified": false }
                    ]
                },
                "meta": { "result_count": 2 }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tweets = repository(&mock_server)
            .search_cashtags(&request(Some("en")))
            .await
            .unwrap();

        assert_eq!(tweets.len(), 2);
        assert_eq!(tweets[0].url.as_deref(), Some("https://x.com/alice/status/1"));
        assert_eq!(tweets[0].like_count, 20);
        assert_eq!(tweets[0].view_count, 300);
        assert_eq!(tweets[1].author.user_name, "bob");
    }

    #[tokio::test]
    async fn it_should_skip_unverified_authors_when_asked() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "id": "1", "author_id": "u1" },
                    { "id": "2", "author_id": "u2" }
                ],
                "includes": { "users": [ { "id": "u1", "username": "alice", "verified": true } ] }
            })))
            .mount(&mock_server)
            .await;

        let mut req = request(None);
        req.only_verified = true;
        let tweets = repository(&mock_server).search_cashtags(&req).await.unwrap();

        assert_eq!(tweets.len(), 1);
        assert_eq!(tweets[0].id, TweetID::from("1"));
    }

    #[tokio::test]
    async fn it_should_return_nothing_for_an_empty_search() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "meta": { "result_count": 0 } })),
            )
            .mount(&mock_server)
            .await;

        let tweets = repository(&mock_server)
            .search_cashtags(&request(None))
            .await
            .unwrap();
        assert!(tweets.is_empty());
    }

    #[tokio::test]
    async fn it_should_raise_a_fetch_error_on_api_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "title": "Unauthorized",
                "status": 401
            })))
            .mount(&mock_server)
            .await;

        let err = repository(&mock_server)
            .search_cashtags(&request(None))
            .await
            .unwrap_err();
        assert!(err.is_error_of(HttpClientError::FetchError));
    }

    #[tokio::test]
    async fn it_should_raise_a_fetch_error_on_garbage() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let err = repository(&mock_server)
            .search_cashtags(&request(None))
            .await
            .unwrap_err();
        assert!(err.is_error_of(HttpClientError::FetchError));
    }
}
