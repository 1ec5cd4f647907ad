use tokio::time::sleep;
use tracing::warn;

use crate::core::{is_retryable_status, retry_delay};
use crate::data::{FetchOptions, Response};
use crate::effects::http::HttpClient;

/// Retry decorator for [`HttpClient`] implementations.
///
/// Retries happen only while waiting for the response head. Once a body
/// stream has been handed out, failures belong to the caller.
///
/// When every attempt ends in a retryable status, the last response is
/// returned as-is rather than converted into an error.
#[derive(Debug, Clone)]
pub struct RetryClient<C> {
    inner: C,
}

impl<C: HttpClient> RetryClient<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: HttpClient> HttpClient for RetryClient<C> {
    type Error = C::Error;

    async fn get(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<Response<Self::Error>, Self::Error> {
        let mut attempt = 0;

        loop {
            let exhausted = attempt >= options.max_retries;

            match self.inner.get(url, options).await {
                Ok(response) if !exhausted && is_retryable_status(response.status) => {
                    warn!(url, status = response.status, attempt = attempt + 1, "retrying after status");
                }
                Ok(response) => return Ok(response),
                Err(e) if !exhausted && C::is_transient(&e) => {
                    warn!(url, error = %e, attempt = attempt + 1, "retrying after transport error");
                }
                Err(e) => return Err(e),
            }

            sleep(retry_delay(attempt, options.retry_backoff)).await;
            attempt += 1;
        }
    }

    fn is_transient(error: &Self::Error) -> bool {
        C::is_transient(error)
    }
}
