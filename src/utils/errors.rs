use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("source file {} load error: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cache file {} load error: {source}", path.display())]
    CacheUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cache file {} write error: {source}", path.display())]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("compressed file {} write error: {source}", path.display())]
    ArtifactWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("filter {filter} failed: {message}")]
    FilterFailed { filter: String, message: String },

    #[error("filter {filter} timed out after {timeout:?}")]
    FilterTimeout { filter: String, timeout: Duration },

    #[error("not found compress group `{0}`")]
    GroupNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigurationInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompressError {
    pub fn filter(filter: &str, message: impl Into<String>) -> Self {
        Self::FilterFailed {
            filter: filter.to_string(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationInvalid(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CompressError>;
