use crate::domain::model::*;
use std::cmp::Ordering;

/// Thresholds applied after classification. Defaults keep everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub lang: Option<String>,
    pub only_verified: bool,
    pub only_blue: bool,
    pub min_like_count: u64,
    pub min_retweet_count: u64,
    pub min_reply_count: u64,
    pub min_view_count: u64,
}

impl From<&Settings> for FilterCriteria {
    fn from(settings: &Settings) -> Self {
        FilterCriteria {
            lang: settings.lang.clone(),
            only_verified: settings.only_verified_users,
            only_blue: settings.only_twitter_blue,
            min_like_count: settings.min_like_count,
            min_retweet_count: settings.min_retweet_count,
            min_reply_count: settings.min_reply_count,
            min_view_count: settings.min_view_count,
        }
    }
}

pub fn filter_by_language(tweets: &[Tweet], lang: Option<&str>) -> Vec<Tweet> {
    match lang {
        None => tweets.to_vec(),
        Some(lang) => tweets
            .iter()
            .filter(|t| {
                t.lang
                    .as_deref()
                    .map_or(false, |l| l.eq_ignore_ascii_case(lang))
            })
            .cloned()
            .collect(),
    }
}

pub fn filter_verified(tweets: &[Tweet], only_verified: bool, only_blue: bool) -> Vec<Tweet> {
    tweets
        .iter()
        .filter(|t| {
            (!only_verified || t.author.is_verified) && (!only_blue || t.author.is_blue())
        })
        .cloned()
        .collect()
}

pub fn filter_by_engagement(tweets: &[Tweet], criteria: &FilterCriteria) -> Vec<Tweet> {
    tweets
        .iter()
        .filter(|t| {
            t.like_count >= criteria.min_like_count
                && t.retweet_count >= criteria.min_retweet_count
                && t.reply_count >= criteria.min_reply_count
                && t.view_count >= criteria.min_view_count
        })
        .cloned()
        .collect()
}

/// Language, then verification, then engagement.
pub fn apply_all_filters(tweets: &[Tweet], criteria: &FilterCriteria) -> Vec<Tweet> {
    let by_lang = filter_by_language(tweets, criteria.lang.as_deref());
    let by_author = filter_verified(&by_lang, criteria.only_verified, criteria.only_blue);
    filter_by_engagement(&by_author, criteria)
}

/// Stable sort on the numeric value of `sort_by`. Ties keep their input order
/// in both directions.
pub fn sort_tweets(tweets: &[Tweet], sort_by: &str, order: SortOrder) -> Vec<Tweet> {
    let mut keyed = tweets
        .iter()
        .map(|t| (t.sort_key(sort_by), t))
        .collect::<Vec<_>>();

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    keyed.into_iter().map(|(_, t)| t.clone()).collect()
}
