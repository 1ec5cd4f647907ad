//! Immutable data types for fetch operations.
//!
//! Request configuration and the response shape handed back by every
//! [`HttpClient`](crate::HttpClient) implementation.

pub mod options;
pub mod response;

pub use options::FetchOptions;
pub use response::{Headers, Response};
