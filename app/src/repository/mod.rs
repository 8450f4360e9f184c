mod repository_error;
mod search_response;
mod tweet_file_repo;
mod tweet_repo;

pub use repository_error::*;
pub use search_response::*;
pub use tweet_file_repo::*;
pub use tweet_repo::*;
