//! I/O operations for HTTP fetching.
//!
//! Everything that touches the network lives behind [`HttpClient`]; the rest of
//! the workspace never names a concrete transport.

mod http;
mod retry;

pub use http::{BoxStream, HttpClient};
pub use retry::RetryClient;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
