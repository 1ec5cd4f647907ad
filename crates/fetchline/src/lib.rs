//! Lazily turn a list of URLs into named, streaming download artifacts.
//!
//! # Architecture
//!
//! - [`descriptor`] - Flattens inputs into ordered [`Descriptor`]s
//! - [`orchestrator`] - Starts one fetch and wires it to an [`Artifact`]
//! - [`producer`] - Hands out artifacts on demand through [`Producer::pull`]
//!
//! The HTTP client is injected through [`fetchline_fetch::HttpClient`], so
//! anything from [`fetchline_fetch::ReqwestClient`] to a scripted test client
//! can drive the pipeline.
//!
//! # Failures
//!
//! A failed download still yields its artifact. The failure is then reported
//! exactly once: to [`DownloadOptions::error_callback`] when one is set,
//! otherwise as a [`DownloadError`] on the artifact's content stream.
//!
//! # Example
//!
//! ```no_run
//! use fetchline::{DownloadOptions, download};
//! use fetchline_fetch::ReqwestClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let urls = ["https://example.com/a.txt", "https://example.com/b.txt"];
//! for artifact in download(ReqwestClient::new()?, urls, DownloadOptions::default())? {
//!     let body = artifact.into_content().bytes().await?;
//!     println!("{} bytes", body.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod descriptor;
pub mod env;
mod error;
pub mod options;
pub mod orchestrator;
pub mod producer;

pub use artifact::{Artifact, Content};
pub use descriptor::{Descriptor, Source, Sources, canonical, derive_name};
pub use env::is_ci;
pub use error::{BoxError, DownloadError, Error, Failure, PLUGIN_NAME, Result};
pub use options::{DownloadOptions, ErrorCallback};
pub use orchestrator::Orchestrator;
pub use producer::{ArtifactSink, Producer, ProducerState, Pull};

use fetchline_fetch::HttpClient;

/// Canonicalize `urls` and build a producer over them.
///
/// Nothing is fetched until the producer is pulled.
///
/// # Errors
///
/// [`Error::NoRuntime`] when called outside a Tokio runtime.
pub fn download<C: HttpClient + 'static>(
    client: C,
    urls: impl Into<Sources>,
    options: DownloadOptions,
) -> Result<Producer<C>> {
    let orchestrator = Orchestrator::new(client, options)?;
    Ok(Producer::new(orchestrator, canonical(urls)))
}
