//! Export command handler.

use super::{ListSource, load_list};
use crate::config::AppConfig;
use crate::export::{DirectorySink, ExportFormat, MemorySink};
use anyhow::{Context, Result};
use std::io::Write as _;
use std::path::PathBuf;

/// Where exported files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Write `items.<ext>` into this directory
    Directory(PathBuf),
    /// Print the contents
    Stdout,
}

/// Run the export command.
///
/// The collection is exported in the order of the restored view state.
/// Returns the written path, `None` for stdout or an empty collection.
pub fn run_export(
    config: &AppConfig,
    source: &ListSource,
    format: ExportFormat,
    target: &ExportTarget,
) -> Result<Option<PathBuf>> {
    let list = load_list(config, source)?;

    match target {
        ExportTarget::Directory(dir) => {
            let mut sink = DirectorySink::new(dir);
            let written = list
                .download(format, &mut sink)
                .with_context(|| format!("failed to export {format}"))?;
            if written.is_none() {
                tracing::warn!("{} is empty, nothing exported", source.input.display());
            }
            Ok(written)
        }
        ExportTarget::Stdout => {
            let mut sink = MemorySink::default();
            list.download(format, &mut sink)
                .with_context(|| format!("failed to export {format}"))?;
            let mut stdout = std::io::stdout().lock();
            for (_, contents) in &sink.files {
                stdout.write_all(contents.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
            Ok(None)
        }
    }
}
