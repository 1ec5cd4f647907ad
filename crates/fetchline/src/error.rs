//! Error types for fetchline.
//!
//! Download failures never surface as `Err` from the producer. They reach the
//! caller either through the configured error callback or as a
//! [`DownloadError`] on the artifact's content stream.

use std::io;

use thiserror::Error;

/// Stable identifier carried by every [`DownloadError`].
pub const PLUGIN_NAME: &str = "fetchline";

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no Tokio runtime available to drive downloads")]
    NoRuntime(#[source] tokio::runtime::TryCurrentError),

    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Why one download failed.
#[derive(Debug, Error)]
pub enum Failure {
    /// The server answered with a status of 400 or above.
    #[error("{0} returned")]
    Status(u16),

    /// No usable response: DNS, connection reset, protocol error, or a body
    /// that broke off mid-stream.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

impl Failure {
    pub fn transport(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Failure::Transport(Box::new(error))
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Failure::Status(code) => Some(*code),
            Failure::Transport(_) => None,
        }
    }
}

/// A failure delivered on an artifact's content stream.
#[derive(Debug, Error)]
#[error("[{plugin}] {url}: {failure}")]
pub struct DownloadError {
    pub plugin: &'static str,
    pub url: String,
    #[source]
    pub failure: Failure,
}

impl DownloadError {
    pub fn new(url: impl Into<String>, failure: Failure) -> Self {
        Self {
            plugin: PLUGIN_NAME,
            url: url.into(),
            failure,
        }
    }
}

impl From<DownloadError> for io::Error {
    fn from(e: DownloadError) -> Self {
        io::Error::other(e)
    }
}
