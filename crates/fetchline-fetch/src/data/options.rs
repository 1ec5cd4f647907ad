use std::sync::Arc;
use std::time::Duration;

/// Configuration for HTTP fetching operations.
///
/// # Examples
///
/// ```
/// use fetchline_fetch::FetchOptions;
/// use std::time::Duration;
///
/// let options = FetchOptions::default()
///     .max_retries(5)
///     .retry_backoff(Duration::from_millis(200))
///     .header("Authorization", "Bearer token");
/// ```
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Maximum number of retry attempts for transient failures.
    ///
    /// - Includes only retries after the initial attempt
    /// - Retries are triggered for network errors and 5xx, 408 and 429 responses
    /// - Never retries once the body has started streaming
    /// - Total attempts = 1 (initial) + max_retries
    ///
    /// Default: 3
    pub max_retries: u32,

    /// Base delay for exponential backoff between retries.
    ///
    /// The actual delay for retry N is: `retry_backoff * 2^N`
    ///
    /// Default: 100ms
    pub retry_backoff: Duration,

    /// Maximum number of redirects followed before giving up.
    ///
    /// Default: 10
    pub max_redirects: usize,

    /// Custom HTTP headers to include with requests.
    ///
    /// Headers are sent with every request, including retries.
    ///
    /// Default: empty
    pub headers: Arc<[(String, String)]>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_backoff: Duration::from_millis(100),
            max_redirects: 10,
            headers: Arc::new([]),
        }
    }
}

impl FetchOptions {
    /// Set the maximum number of retries.
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base retry backoff duration.
    #[must_use]
    pub fn retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    /// Set the redirect limit.
    #[must_use]
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Add a single custom HTTP header.
    ///
    /// # Examples
    ///
    /// ```
    /// use fetchline_fetch::FetchOptions;
    ///
    /// let options = FetchOptions::default()
    ///     .header("Authorization", "Bearer token")
    ///     .header("User-Agent", "MyApp/1.0");
    /// assert_eq!(options.headers.len(), 2);
    /// ```
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.headers = Arc::from(headers);
        self
    }

    /// Set multiple custom HTTP headers at once.
    ///
    /// This replaces any existing headers.
    #[must_use]
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = Arc::from(headers);
        self
    }
}
