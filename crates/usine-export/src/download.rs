//! Handing finished documents to the user.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use usine_core::{UsineError, UsineResult};

use crate::report::ExportedFile;

/// Somewhere a produced document can be delivered to.
#[async_trait]
pub trait DownloadTarget: Send + Sync {
    /// Stores the file and returns where it ended up.
    async fn save(&self, file: &ExportedFile) -> UsineResult<PathBuf>;
}

/// Rejects names that would escape the target or disagree with the format.
pub fn check_filename(file: &ExportedFile) -> UsineResult<()> {
    let name = file.filename.as_str();
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(UsineError::Validation(format!(
            "Invalid export filename: {:?}",
            name
        )));
    }
    if !file.format.matches_filename(name) {
        return Err(UsineError::Validation(format!(
            "Filename {} does not match format {}",
            name,
            file.format.label()
        )));
    }
    Ok(())
}

/// Checks the file then hands it to `target`.
pub async fn deliver(target: &dyn DownloadTarget, file: &ExportedFile) -> UsineResult<PathBuf> {
    check_filename(file)?;
    let path = target.save(file).await?;
    tracing::info!("Saved {} ({} bytes)", path.display(), file.len());
    Ok(path)
}

/// Writes exports into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Temp file in the destination directory, then rename over the target.
    async fn write_atomic(path: &Path, data: &[u8]) -> UsineResult<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;

        tokio::fs::write(temp_file.path(), data).await?;
        temp_file.persist(path).map_err(|err| err.error)?;

        tracing::debug!("Atomically wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}

#[async_trait]
impl DownloadTarget for DirectoryTarget {
    async fn save(&self, file: &ExportedFile) -> UsineResult<PathBuf> {
        check_filename(file)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(&file.filename);
        Self::write_atomic(&path, &file.bytes).await?;
        Ok(path)
    }
}
