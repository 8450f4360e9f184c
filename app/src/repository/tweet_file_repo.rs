use crate::domain::interface::*;
use crate::domain::model::*;
use crate::error::*;
use async_trait::async_trait;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the ranked tweets as a pretty-printed JSON array.
#[derive(Clone, Default)]
pub struct TweetFileRepository;

impl TweetFileRepository {
    pub fn new() -> Self {
        TweetFileRepository
    }

    fn write(path: &Path, tweets: &[Tweet]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, tweets)
            .map_err(GeneralError::serialization_error)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl ITweetSink for TweetFileRepository {
    async fn save_tweets(&self, path: &Path, tweets: &[Tweet]) -> Result<()> {
        let path = path.to_path_buf();
        let tweets = tweets.to_vec();

        tokio::task::spawn_blocking(move || Self::write(&path, &tweets)).await?
    }
}
