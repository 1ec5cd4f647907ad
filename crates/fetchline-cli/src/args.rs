use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use fetchline::Sources;

#[derive(Debug, Parser)]
#[command(name = "fetchline")]
#[command(version)]
#[command(about = "Download URLs into a directory, a batch at a time.")]
#[command(long_about = "Download URLs into a directory, a batch at a time.\n\n\
    From arguments:   fetchline https://host/a.txt https://host/b.txt\n\
    From a manifest:  fetchline --manifest files.json --out dist\n\n\
    A manifest is JSON: a URL string, a {\"url\", \"name\"} object, or an array of either.")]
pub struct Args {
    /// URLs to download; each file is named after the URL's last path segment
    pub urls: Vec<String>,

    /// JSON manifest of URLs and {url, name} objects, downloaded after any positional URLs
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Directory the files are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,

    /// Treat the run as non-interactive: no progress bars
    #[arg(long)]
    pub ci: bool,

    /// Downloads in flight at once
    #[arg(short, long, default_value = "4")]
    pub batch: NonZeroUsize,

    /// Retries per download for connection failures and 5xx/408/429 responses
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Log failed downloads and keep going instead of stopping at the first one
    #[arg(long)]
    pub continue_on_error: bool,
}

impl Args {
    /// Positional URLs followed by the manifest's entries.
    ///
    /// # Errors
    ///
    /// Fails when the manifest cannot be read or parsed, or when there is
    /// nothing to download.
    pub async fn sources(&self) -> Result<Sources> {
        let mut sources: Sources = self.urls.iter().map(String::as_str).collect();

        if let Some(manifest) = &self.manifest {
            let text = tokio::fs::read_to_string(manifest)
                .await
                .with_context(|| format!("failed to read manifest {}", manifest.display()))?;
            let listed = Sources::from_json(&text)
                .with_context(|| format!("failed to parse manifest {}", manifest.display()))?;
            sources.extend(listed);
        }

        if sources.is_empty() {
            bail!("nothing to download: pass URLs or --manifest");
        }
        Ok(sources)
    }
}
