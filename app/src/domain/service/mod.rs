mod filters;
mod query_builder;
mod sentiment_analyzer;
mod tweet_service;

pub use filters::*;
pub use query_builder::*;
pub use sentiment_analyzer::*;
pub use tweet_service::*;
