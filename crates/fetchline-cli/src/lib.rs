//! Command-line front end for fetchline.
//!
//! Pulls artifacts a batch at a time and writes each one into the output
//! directory. The next batch is pulled only once the current one is on disk.
//! Artifacts sharing a name are written to suffixed paths, never to the same
//! file.

pub mod args;
pub mod save;

use std::path::PathBuf;

use anyhow::{Context, Result};
use fetchline::{DownloadOptions, download};
use fetchline_fetch::{FetchOptions, ReqwestClient, RetryClient};
use futures_util::future::join_all;
use tracing::{info, warn};

pub use args::Args;
pub use save::Targets;

/// What a run left behind.
#[derive(Debug, Default)]
pub struct Summary {
    pub saved: Vec<(PathBuf, u64)>,
    pub failed: usize,
}

pub async fn run(args: Args) -> Result<Summary> {
    let sources = args.sources().await?;
    tokio::fs::create_dir_all(&args.out)
        .await
        .with_context(|| format!("failed to create {}", args.out.display()))?;

    let fetch = FetchOptions::default().max_retries(args.retries);
    let client = RetryClient::new(ReqwestClient::with_options(&fetch)?);

    let options = DownloadOptions::default().ci(args.ci).fetch(fetch);
    let mut producer = download(client, sources, options)?;
    let mut summary = Summary::default();
    let mut targets = Targets::new(&args.out);
    let batch = args.batch.get();

    loop {
        let mut artifacts = Vec::with_capacity(batch);
        let pull = producer.pull(batch, &mut artifacts);

        let saves = artifacts.into_iter().map(|artifact| {
            let path = targets.claim(artifact.name());
            async move {
                match path {
                    Ok(path) => save::save(artifact, path).await,
                    Err(e) => Err(e),
                }
            }
        });
        let results = join_all(saves).await;
        for result in results {
            match result {
                Ok((path, bytes)) => {
                    info!(path = %path.display(), bytes, "saved");
                    summary.saved.push((path, bytes));
                }
                Err(e) if args.continue_on_error => {
                    warn!("skipping: {e:#}");
                    summary.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        if pull.ended {
            break;
        }
    }

    Ok(summary)
}
