//! One descriptor in, one in-flight artifact out.

use std::fmt;
use std::sync::Arc;

use fetchline_fetch::{Headers, HttpClient, Response};
use fetchline_progress::{Instrument, ProgressDrawTarget, ProgressMode, Tracker};
use futures_util::StreamExt;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::artifact::{Artifact, ContentSender, content_channel};
use crate::descriptor::Descriptor;
use crate::env;
use crate::error::{DownloadError, Error, Failure, Result};
use crate::options::{DownloadOptions, ErrorCallback};

/// Starts downloads on the Tokio runtime it was created in.
///
/// Each [`start`](Orchestrator::start) spawns one task that owns the fetch, the
/// progress instrument and the sending half of the artifact's content channel.
pub struct Orchestrator<C> {
    client: Arc<C>,
    options: Arc<DownloadOptions>,
    non_interactive: bool,
    draw_target: fn() -> ProgressDrawTarget,
    runtime: Handle,
}

impl<C> Clone for Orchestrator<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            options: Arc::clone(&self.options),
            non_interactive: self.non_interactive,
            draw_target: self.draw_target,
            runtime: self.runtime.clone(),
        }
    }
}

impl<C> fmt::Debug for Orchestrator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("options", &self.options)
            .field("non_interactive", &self.non_interactive)
            .finish_non_exhaustive()
    }
}

impl<C: HttpClient + 'static> Orchestrator<C> {
    /// Bind to the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// [`Error::NoRuntime`] when called outside a runtime.
    pub fn new(client: C, options: DownloadOptions) -> Result<Self> {
        let runtime = Handle::try_current().map_err(Error::NoRuntime)?;
        Ok(Self::with_runtime(client, options, runtime))
    }

    pub fn with_runtime(client: C, options: DownloadOptions, runtime: Handle) -> Self {
        let non_interactive = options.ci || env::is_ci();
        Self {
            client: Arc::new(client),
            options: Arc::new(options),
            non_interactive,
            draw_target: ProgressDrawTarget::stdout,
            runtime,
        }
    }

    /// Whether progress rendering is suppressed for downloads started here.
    pub fn non_interactive(&self) -> bool {
        self.non_interactive
    }

    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    /// Kick off the fetch for `descriptor` and hand back its artifact at once.
    ///
    /// The artifact's content fills in as the body arrives.
    pub fn start(&self, descriptor: Descriptor) -> Artifact {
        info!(url = %descriptor.url(), name = %descriptor.name(), "downloading");

        let (tx, content) = content_channel(self.options.channel_capacity);
        let task = Download {
            client: Arc::clone(&self.client),
            options: Arc::clone(&self.options),
            non_interactive: self.non_interactive,
            draw_target: self.draw_target,
            descriptor: descriptor.clone(),
            tx,
        };
        self.runtime.spawn(task.run());

        Artifact::new(descriptor, content)
    }
}

/// Where a failure goes. Exactly one destination per failure.
enum ErrorRoute<'a> {
    Callback(&'a ErrorCallback),
    Channel(&'a ContentSender),
}

impl<'a> ErrorRoute<'a> {
    fn new(options: &'a DownloadOptions, tx: &'a ContentSender) -> Self {
        match &options.error_callback {
            Some(callback) => ErrorRoute::Callback(callback),
            None => ErrorRoute::Channel(tx),
        }
    }

    async fn report(&self, url: &str, failure: Failure) {
        warn!(url, error = %failure, "download failed");
        match self {
            ErrorRoute::Callback(callback) => callback(failure),
            ErrorRoute::Channel(tx) => {
                if !tx.fail(DownloadError::new(url, failure)).await {
                    debug!(url, "failure not delivered, content already dropped");
                }
            }
        }
    }
}

struct Download<C> {
    client: Arc<C>,
    options: Arc<DownloadOptions>,
    non_interactive: bool,
    draw_target: fn() -> ProgressDrawTarget,
    descriptor: Descriptor,
    tx: ContentSender,
}

impl<C: HttpClient> Download<C> {
    async fn run(self) {
        let url = self.descriptor.url();
        let route = ErrorRoute::new(&self.options, &self.tx);

        let response = match self.client.get(url, &self.options.fetch).await {
            Ok(response) => response,
            Err(e) => {
                route.report(url, Failure::transport(e)).await;
                return;
            }
        };

        // The body is still forwarded after a failing status.
        if response.is_failure() {
            route.report(url, Failure::Status(response.status)).await;
        }

        if let Err(failure) = self.forward(response).await {
            route.report(url, failure).await;
        }
    }

    fn instrument(&self, headers: &Headers) -> Instrument {
        let mode = ProgressMode::select(headers.content_length(), self.non_interactive);
        Instrument::with_target(mode, self.descriptor.name(), (self.draw_target)())
    }

    /// Pipe the body into the content channel, feeding the instrument as it goes.
    async fn forward(&self, response: Response<C::Error>) -> std::result::Result<(), Failure> {
        let url = self.descriptor.url();
        let Response { headers, mut body, .. } = response;
        let mut instrument = self.instrument(&headers);
        let mut received = 0u64;

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    instrument.abandon();
                    return Err(Failure::transport(e));
                }
            };
            let len = chunk.len() as u64;
            instrument.step(len);
            if !self.tx.send(chunk).await {
                instrument.abandon();
                debug!(url, received, "content dropped, stopping download");
                return Ok(());
            }
            received += len;
        }

        instrument.finish();
        info!(url, bytes = received, "download complete");
        Ok(())
    }
}
