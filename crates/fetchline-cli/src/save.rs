use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use fetchline::Artifact;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Where `name` lands inside `dir`. Only the final path component is kept.
pub fn target(dir: &Path, name: &str) -> Result<PathBuf> {
    let file = Path::new(name)
        .file_name()
        .ok_or_else(|| anyhow!("artifact name {name:?} is not a file name"))?;
    Ok(dir.join(file))
}

/// Hands out one distinct path per artifact for the whole run.
///
/// A name already claimed gets a numeric suffix: `data`, `data.1`, `data.2`.
#[derive(Debug)]
pub struct Targets {
    dir: PathBuf,
    claimed: HashSet<PathBuf>,
}

impl Targets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            claimed: HashSet::new(),
        }
    }

    pub fn claim(&mut self, name: &str) -> Result<PathBuf> {
        let path = target(&self.dir, name)?;
        if self.claimed.insert(path.clone()) {
            return Ok(path);
        }

        let base = path.file_name().map(OsString::from).unwrap_or_default();
        let renamed = (1..)
            .map(|n| {
                let mut file = base.clone();
                file.push(format!(".{n}"));
                self.dir.join(file)
            })
            .find(|candidate| !self.claimed.contains(candidate))
            .unwrap_or(path);
        warn!(name, path = %renamed.display(), "name already used, renaming");
        self.claimed.insert(renamed.clone());
        Ok(renamed)
    }
}

/// Stream an artifact to `path`, returning the path and the bytes written.
///
/// A download failure delivered on the content stream aborts the copy; the
/// partial file is removed.
pub async fn save(artifact: Artifact, path: PathBuf) -> Result<(PathBuf, u64)> {
    let url = artifact.url().to_string();

    let mut file = File::create(&path)
        .await
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut reader = artifact.into_content().into_reader();

    let written = match tokio::io::copy(&mut reader, &mut file).await {
        Ok(written) => written,
        Err(e) => {
            drop(file);
            if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %cleanup, "partial file left behind");
            }
            return Err(e).with_context(|| format!("failed to download {url}"));
        }
    };
    file.flush()
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok((path, written))
}
