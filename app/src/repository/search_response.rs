use crate::domain::model::*;
use serde::*;
use serde_json::Value;
use std::collections::HashMap;

// Counts arrive as numbers, occasionally as numeric strings; anything else
// counts as absent. Negative values clamp to zero.
fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|i| i.max(0) as u64))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse::<i64>().ok().map(|i| i.max(0) as u64),
        _ => None,
    }
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicMetrics {
    #[serde(default, deserialize_with = "lenient_count")]
    pub retweet_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub reply_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub like_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub impression_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub view_count: Option<u64>,
}

impl PublicMetrics {
    /// `impression_count` is the current name; older payloads used `view_count`.
    pub fn views(&self) -> u64 {
        self.impression_count.or(self.view_count).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferencedTweet {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTweet {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub public_metrics: Option<PublicMetrics>,
    #[serde(default)]
    pub referenced_tweets: Option<Vec<ReferencedTweet>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetrics {
    #[serde(default, deserialize_with = "lenient_count")]
    pub followers_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub verified: bool,
    #[serde(default)]
    pub public_metrics: Option<UserMetrics>,
}

impl RawUser {
    fn to_author(&self) -> Author {
        let user_name = self
            .username
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        Author {
            user_name,
            name: self.name.clone(),
            is_verified: self.verified,
            followers: self
                .public_metrics
                .as_ref()
                .and_then(|m| m.followers_count)
                .unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Option<Vec<RawUser>>,
    #[serde(default)]
    pub tweets: Option<Vec<RawTweet>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponseMeta {
    #[serde(default)]
    pub newest_id: Option<String>,
    #[serde(default)]
    pub oldest_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub result_count: Option<u64>,
    #[serde(default)]
    pub next_token: Option<String>,
}

/// Body of `GET /2/tweets/search/recent`. Every section is optional: the API
/// omits `data` and `includes` entirely when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<RawTweet>>,
    #[serde(default)]
    pub includes: Option<Includes>,
    #[serde(default)]
    pub meta: Option<SearchResponseMeta>,
}

impl SearchResponse {
    /// Flattens posts and their expansions into output records, all with a
    /// NEUTRAL placeholder sentiment. Authors failing `only_verified` /
    /// `only_blue` are dropped here already.
    pub fn normalize(&self, only_verified: bool, only_blue: bool) -> Vec<Tweet> {
        let includes = self.includes.as_ref();
        let users = includes
            .and_then(|i| i.users.as_deref())
            .unwrap_or_default();
        let quoted = includes
            .and_then(|i| i.tweets.as_deref())
            .unwrap_or_default();

        let users_index = users
            .iter()
            .filter_map(|u| u.id.as_deref().map(|id| (id, u)))
            .collect::<HashMap<&str, &RawUser>>();
        let quoted_index = quoted
            .iter()
            .filter_map(|t| t.id.as_deref().map(|id| (id, t)))
            .collect::<HashMap<&str, &RawTweet>>();

        self.data
            .iter()
            .flatten()
            .filter_map(|item| {
                let author = item
                    .author_id
                    .as_deref()
                    .and_then(|id| users_index.get(id))
                    .map(|u| u.to_author())
                    .unwrap_or_default();

                if only_verified && !author.is_verified {
                    return None;
                }
                if only_blue && !author.is_blue() {
                    return None;
                }

                let id = TweetID::from(item.id.clone().unwrap_or_default());
                let url = if id.is_empty() {
                    None
                } else {
                    Some(format!("https://x.com/{}/status/{}", author.user_name, id))
                };

                let quote = item
                    .referenced_tweets
                    .iter()
                    .flatten()
                    .filter(|r| r.kind.as_deref() == Some("quoted"))
                    .find_map(|r| r.id.as_deref().and_then(|id| quoted_index.get(id)))
                    .map(|q| QuotedTweet {
                        id: TweetID::from(q.id.clone().unwrap_or_default()),
                        text: q.text.clone().unwrap_or_default(),
                    });

                let metrics = item.public_metrics.clone().unwrap_or_default();

                Some(Tweet {
                    kind: PostKind::Tweet,
                    id,
                    url,
                    text: item.text.clone().unwrap_or_default(),
                    sentiment: Sentiment::Neutral,
                    retweet_count: metrics.retweet_count.unwrap_or(0),
                    reply_count: metrics.reply_count.unwrap_or(0),
                    like_count: metrics.like_count.unwrap_or(0),
                    view_count: metrics.views(),
                    created_at: item.created_at.clone(),
                    lang: item.lang.clone(),
                    author,
                    quote,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SearchResponse {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> SearchResponse {
        parse(json!({
            "data": [
                {
                    "id": "1592104440001359873",
                    "text": "$BTC breakout, quoting this",
                    "author_id": "10",
                    "created_at": "2022-11-14T10:37:33.000Z",
                    "lang": "en",
                    "public_metrics": {
                        "retweet_count": 4,
                        "reply_count": 2,
                        "like_count": 31,
                        "quote_count": 0,
                        "impression_count": 1200
                    },
                    "referenced_tweets": [
                        { "type": "replied_to", "id": "900" },
                        { "type": "quoted", "id": "404" },
                        { "type": "quoted", "id": "901" },
                        { "type": "quoted", "id": "902" }
                    ]
                },
                {
                    "id": "1592094492223737856",
                    "text": "$ETH looks weak",
                    "author_id": "11",
                    "created_at": "2022-11-14T09:58:01.000Z",
                    "lang": "en",
                    "public_metrics": { "like_count": "7", "retweet_count": "n/a", "view_count": 88 }
                }
            ],
            "includes": {
                "users": [
                    {
                        "id": "10",
                        "username": "ekusiadadus",
                        "name": "Ekusi",
                        "verified": true,
                        "public_metrics": { "followers_count": 5321 }
                    },
                    { "id": "11", "username": "", "verified": false }
                ],
                "tweets": [
                    { "id": "900", "text": "the reply target" },
                    { "id": "901", "text": "the quoted post" },
                    { "id": "902", "text": "a later quote" }
                ]
            },
            "meta": { "result_count": 2, "newest_id": "1592104440001359873" }
        }))
    }

    #[test]
    fn it_should_normalize_posts_with_expansions() {
        let tweets = sample().normalize(false, false);
        assert_eq!(tweets.len(), 2);

        let first = &tweets[0];
        assert_eq!(first.id, TweetID::from("1592104440001359873"));
        assert_eq!(
            first.url.as_deref(),
            Some("https://x.com/ekusiadadus/status/1592104440001359873")
        );
        assert_eq!(first.sentiment, Sentiment::Neutral);
        assert_eq!(first.like_count, 31);
        assert_eq!(first.retweet_count, 4);
        assert_eq!(first.reply_count, 2);
        assert_eq!(first.view_count, 1200);
        assert_eq!(first.created_at.as_deref(), Some("2022-11-14T10:37:33.000Z"));
        assert_eq!(first.author.user_name, "ekusiadadus");
        assert_eq!(first.author.name.as_deref(), Some("Ekusi"));
        assert!(first.author.is_verified);
        assert_eq!(first.author.followers, 5321);
    }

    #[test]
    fn it_should_pick_the_first_resolvable_quote() {
        let tweets = sample().normalize(false, false);

        let quote = tweets[0].quote.as_ref().unwrap();
        assert_eq!(quote.id, TweetID::from("901"));
        assert_eq!(quote.text, "the quoted post");
        assert!(tweets[1].quote.is_none());
    }

    #[test]
    fn it_should_default_unparseable_metrics() {
        let tweets = sample().normalize(false, false);
        let second = &tweets[1];

        assert_eq!(second.like_count, 7);
        assert_eq!(second.retweet_count, 0);
        assert_eq!(second.reply_count, 0);
        assert_eq!(second.view_count, 88);
        assert_eq!(second.author.user_name, "unknown");
        assert_eq!(second.author.followers, 0);
        assert_eq!(
            second.url.as_deref(),
            Some("https://x.com/unknown/status/1592094492223737856")
        );
    }

    #[test]
    fn it_should_use_a_default_author_without_includes() {
        let response = parse(json!({
            "data": [{ "id": "1", "text": "$BTC", "author_id": "42" }]
        }));

        let tweets = response.normalize(false, false);
        assert_eq!(tweets.len(), 1);
        assert_eq!(tweets[0].author, Author::default());
        assert_eq!(tweets[0].author.user_name, "unknown");
        assert!(tweets[0].quote.is_none());
        assert_eq!(tweets[0].view_count, 0);
        assert_eq!(tweets[0].lang, None);
    }

    #[test]
    fn it_should_resolve_authors_when_includes_lack_posts() {
        let response = parse(json!({
            "data": [{
                "id": "1",
                "text": "$BTC",
                "author_id": "10",
                "referenced_tweets": [{ "type": "quoted", "id": "901" }]
            }],
            "includes": { "users": [{ "id": "10", "username": "trader" }] }
        }));

        let first = response.normalize(false, false);
        let second = response.normalize(false, false);
        assert_eq!(first, second);
        assert_eq!(first[0].author.user_name, "trader");
        assert!(first[0].quote.is_none());
        assert_eq!(
            response.includes.as_ref().and_then(|i| i.users.as_ref()).map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn it_should_leave_the_url_empty_without_an_id() {
        let response = parse(json!({ "data": [{ "text": "no id" }] }));

        let tweets = response.normalize(false, false);
        assert_eq!(tweets[0].url, None);
        assert!(tweets[0].id.is_empty());
    }

    #[test]
    fn it_should_drop_unverified_authors_inline() {
        let verified_only = sample().normalize(true, false);
        assert_eq!(verified_only.len(), 1);
        assert_eq!(verified_only[0].author.user_name, "ekusiadadus");

        let blue_only = sample().normalize(false, true);
        assert_eq!(blue_only.len(), 1);
    }

    #[test]
    fn it_should_accept_an_empty_body() {
        let response = parse(json!({ "meta": { "result_count": 0 } }));
        assert!(response.normalize(false, false).is_empty());
    }

    #[test]
    fn it_should_coerce_counts() {
        assert_eq!(count_from_value(&json!(12)), Some(12));
        assert_eq!(count_from_value(&json!(-3)), Some(0));
        assert_eq!(count_from_value(&json!(4.9)), Some(4));
        assert_eq!(count_from_value(&json!(" 15 ")), Some(15));
        assert_eq!(count_from_value(&json!("abc")), None);
        assert_eq!(count_from_value(&json!(null)), None);
        assert_eq!(count_from_value(&json!([1])), None);
    }
}
