//! Ephemeral working area for downloaded slides

use crate::error::{Error, Result};
use std::path::Path;
use tempfile::TempDir;

const WORK_DIR_PREFIX: &str = "slidegrab-";

/// Temporary directory owning every downloaded slide of one run
///
/// Removed by [`WorkingArea::close`]; dropping it without closing also removes
/// the directory, so an early return or panic never leaves slides behind.
#[derive(Debug)]
pub struct WorkingArea {
    dir: TempDir,
}

impl WorkingArea {
    /// Create a working area under `parent`, or the system temp dir if `None`
    pub fn create(parent: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORK_DIR_PREFIX);

        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create working area: {}", e),
            ))
        })?;

        tracing::debug!(path = ?dir.path(), "created working area");
        Ok(Self { dir })
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory and everything in it
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to remove working area '{}': {}", path.display(), e),
            ))
        })?;
        tracing::debug!(?path, "removed working area");
        Ok(())
    }
}
