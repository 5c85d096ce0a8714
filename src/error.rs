use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ActivityError>;

/// Boxed error produced by the chart backend.
pub type RenderSource = Box<dyn std::error::Error + Send + Sync>;

/// Boxed error produced while obtaining history: libgit2 or the scratch directory.
pub type FetchSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to read commit cache {path}: {source}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode commit cache {path}: {source}")]
    CacheDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write commit cache {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode commit cache {path}: {source}")]
    CacheEncode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to fetch history for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchSource,
    },
    #[error("Failed to render chart for {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: RenderSource,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Run did not finish within {0:?}")]
    Timeout(Duration),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ActivityError {
    pub fn fetch<E>(url: impl Into<String>, source: E) -> Self
    where
        E: Into<FetchSource>,
    {
        ActivityError::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn render<E>(name: impl Into<String>, source: E) -> Self
    where
        E: Into<RenderSource>,
    {
        ActivityError::Render {
            name: name.into(),
            source: source.into(),
        }
    }

    /// True for the deadline failure, which callers report separately.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ActivityError::Timeout(_))
    }
}
