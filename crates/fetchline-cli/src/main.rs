use anyhow::Result;
use clap::Parser;
use fetchline_cli::{Args, run};
use tracing::{info, metadata::LevelFilter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Progress owns stdout; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let summary = run(Args::parse()).await?;
    info!(saved = summary.saved.len(), failed = summary.failed, "finished");
    Ok(())
}
