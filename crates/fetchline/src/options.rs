use std::fmt;
use std::sync::Arc;

use fetchline_fetch::FetchOptions;

use crate::error::Failure;

/// Receives every download failure instead of the artifact's content stream.
pub type ErrorCallback = Arc<dyn Fn(Failure) + Send + Sync>;

/// Configuration shared by every download a producer starts.
///
/// # Examples
///
/// ```
/// use fetchline::DownloadOptions;
///
/// let options = DownloadOptions::default()
///     .ci(true)
///     .error_callback(|failure| eprintln!("download failed: {failure}"));
/// assert!(options.ci);
/// ```
#[derive(Clone)]
pub struct DownloadOptions {
    /// Treat the run as non-interactive even outside CI, suppressing progress.
    ///
    /// Default: false
    pub ci: bool,

    /// Failure sink. When set, failures go here and never reach the content
    /// stream.
    ///
    /// Default: None
    pub error_callback: Option<ErrorCallback>,

    /// Options forwarded to the HTTP client on every request.
    pub fetch: FetchOptions,

    /// Body chunks buffered per artifact before the download waits for its
    /// reader.
    ///
    /// Default: 16
    pub channel_capacity: usize,
}

impl fmt::Debug for DownloadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadOptions")
            .field("ci", &self.ci)
            .field("error_callback", &self.error_callback.as_ref().map(|_| "{ ... }"))
            .field("fetch", &self.fetch)
            .field("channel_capacity", &self.channel_capacity)
            .finish()
    }
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            ci: false,
            error_callback: None,
            fetch: FetchOptions::default(),
            channel_capacity: 16,
        }
    }
}

impl DownloadOptions {
    #[must_use]
    pub fn ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    #[must_use]
    pub fn error_callback(mut self, callback: impl Fn(Failure) + Send + Sync + 'static) -> Self {
        self.error_callback = Some(Arc::new(callback));
        self
    }

    #[must_use]
    pub fn fetch(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// Set the per-artifact chunk buffer. Zero is raised to one.
    #[must_use]
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = DownloadOptions::default();
        assert!(!options.ci);
        assert!(options.error_callback.is_none());
        assert_eq!(options.channel_capacity, 16);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        assert_eq!(DownloadOptions::default().channel_capacity(0).channel_capacity, 1);
    }

    #[test]
    fn debug_hides_callback() {
        let options = DownloadOptions::default().error_callback(|_| {});
        let debug = format!("{options:?}");
        assert!(debug.contains("error_callback: Some(\"{ ... }\")"));
    }
}
