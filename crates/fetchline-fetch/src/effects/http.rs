use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::Stream;

use crate::data::{FetchOptions, Response};

/// A boxed stream type for HTTP response bodies.
///
/// The stream yields `Result<Bytes, E>` where E is the error type from the HTTP client.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface needed to start a download.
/// Implementations handle their own redirect following, timeout configuration,
/// and error mapping.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - [`RetryClient`](crate::RetryClient): Backoff decorator over any client
/// - Scripted implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures (DNS, connection reset, protocol errors).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET and resolve once the response head has arrived.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    /// * `options` - Extra headers and retry/redirect limits
    ///
    /// # Returns
    ///
    /// The status, headers and a stream over the body. A status of 400 or above
    /// is still `Ok`: judging the status is the caller's business.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response head could be obtained.
    fn get(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> impl Future<Output = Result<Response<Self::Error>, Self::Error>> + Send;

    /// Whether `error` is worth another attempt.
    ///
    /// Defaults to `true`: a transport failure before the head arrived is
    /// usually a connection problem.
    fn is_transient(error: &Self::Error) -> bool {
        let _ = error;
        true
    }
}

impl<C: HttpClient> HttpClient for Arc<C> {
    type Error = C::Error;

    fn get(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> impl Future<Output = Result<Response<Self::Error>, Self::Error>> + Send {
        (**self).get(url, options)
    }

    fn is_transient(error: &Self::Error) -> bool {
        C::is_transient(error)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::Headers;
    use crate::error::{FetchError, Result};
    use futures_util::TryStreamExt;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use reqwest::redirect::Policy;

    /// Production HTTP client implementation using reqwest.
    ///
    /// The redirect limit is fixed when the client is built; per-request
    /// `max_redirects` values are ignored.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
        max_redirects: usize,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient following at most 10 redirects.
        pub fn new() -> Result<Self> {
            Self::with_options(&FetchOptions::default())
        }

        pub fn with_options(options: &FetchOptions) -> Result<Self> {
            let client = reqwest::Client::builder()
                .redirect(Policy::limited(options.max_redirects))
                .build()
                .map_err(|e| FetchError::ClientBuild(e.to_string()))?;
            Ok(Self {
                client,
                max_redirects: options.max_redirects,
            })
        }

        fn map_error(&self, e: reqwest::Error) -> FetchError {
            if e.is_redirect() {
                FetchError::TooManyRedirects {
                    max: self.max_redirects,
                }
            } else if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Reqwest(e)
            }
        }
    }

    /// Extra request headers, rejected up front when a name or value is not
    /// valid HTTP.
    fn header_map(options: &FetchOptions) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(options.headers.len());
        for (name, value) in options.headers.iter() {
            let invalid = |reason: String| FetchError::InvalidHeader {
                name: name.clone(),
                reason,
            };
            let key = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| invalid(e.to_string()))?;
            let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            map.append(key, value);
        }
        Ok(map)
    }

    impl HttpClient for ReqwestClient {
        type Error = FetchError;

        async fn get(&self, url: &str, options: &FetchOptions) -> Result<Response<FetchError>> {
            let request = self.client.get(url).headers(header_map(options)?);

            let response = request.send().await.map_err(|e| self.map_error(e))?;
            let status = response.status().as_u16();
            let headers: Headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
                .collect();
            let body = response.bytes_stream().map_err(FetchError::from);

            Ok(Response::new(status, headers, Box::pin(body)))
        }

        fn is_transient(error: &FetchError) -> bool {
            error.is_transient()
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
