//! HTTP fetch capability for fetchline.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Request options and response types
//! - [`core`] - Pure transformations (backoff, status classification)
//! - [`effects`] - I/O behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Injectable**: downstream code only sees [`HttpClient`], so tests drive
//!   the pipeline with scripted responses
//! - **Streaming**: response bodies are exposed as byte streams, never buffered
//! - **Retry as a layer**: [`RetryClient`] wraps any client with exponential backoff
//! - **Mechanism-Only**: status codes are reported, never judged; the caller
//!   decides what a 404 means

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use core::{is_retryable_status, retry_delay};
pub use data::{FetchOptions, Headers, Response};
pub use effects::{BoxStream, HttpClient, RetryClient};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{FetchError, Result};
