//! Error types for fetchline-fetch.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("too many redirects (more than {max})")]
    TooManyRedirects { max: usize },

    #[error("request timeout")]
    Timeout,

    #[cfg(feature = "reqwest")]
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

impl FetchError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout => true,
            FetchError::ClientBuild(_)
            | FetchError::InvalidHeader { .. }
            | FetchError::TooManyRedirects { .. } => false,
            #[cfg(feature = "reqwest")]
            FetchError::Reqwest(e) => {
                !e.is_redirect()
                    && !e.is_builder()
                    && (e.is_connect() || e.is_timeout() || e.is_request() || e.is_body())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_transient() {
        assert!(FetchError::Timeout.is_transient());
    }

    #[test]
    fn configuration_errors_are_not_transient() {
        assert!(!FetchError::ClientBuild("tls".into()).is_transient());
        assert!(!FetchError::TooManyRedirects { max: 10 }.is_transient());
        assert!(
            !FetchError::InvalidHeader {
                name: "X".into(),
                reason: "bad".into()
            }
            .is_transient()
        );
    }

    #[test]
    fn display_includes_redirect_limit() {
        let e = FetchError::TooManyRedirects { max: 10 };
        assert_eq!(e.to_string(), "too many redirects (more than 10)");
    }
}
