//! File feed — replays a saved log file to EOF.

use std::path::Path;

use tokio::fs::File;
use tokio::io::BufReader;

use crate::error::FeedError;

pub fn open(path: &Path) -> Result<BufReader<File>, FeedError> {
    let file = std::fs::File::open(path)
        .map_err(|source| FeedError::Open { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "file feed opened");
    Ok(BufReader::new(File::from_std(file)))
}
