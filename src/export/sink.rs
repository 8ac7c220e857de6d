//! Destinations for exported files.

use crate::error::{ExportErrorKind, PriceListError};
use std::path::{Path, PathBuf};

/// Receives a finished export.
pub trait ExportSink {
    /// Store `contents` under `file_name` and return where it ended up.
    fn deliver(&mut self, file_name: &str, contents: &str) -> crate::Result<PathBuf>;
}

/// Writes exports into a directory, replacing existing files.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, file_name: &str, contents: &str) -> crate::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| PriceListError::io(&self.dir, e))?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, contents).map_err(|e| {
            PriceListError::export(
                path.display().to_string(),
                ExportErrorKind::Delivery(e.to_string()),
            )
        })?;
        tracing::info!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(path)
    }
}

/// Keeps exports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: Vec<(String, String)>,
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, file_name: &str, contents: &str) -> crate::Result<PathBuf> {
        self.files.push((file_name.to_string(), contents.to_string()));
        Ok(PathBuf::from(file_name))
    }
}
