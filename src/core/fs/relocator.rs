//! Cross-volume tolerant file moves
//!
//! A rename is attempted first. When it fails for any reason other than a
//! missing source (typically because source and destination are on different
//! volumes) the file is copied and the source removed afterwards.

use crate::domain::{Result, RetouchError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// How a relocation was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationStrategy {
    /// Atomic rename
    Rename,
    /// Copy followed by removal of the source
    CopyThenDelete,
}

/// Result of a successful relocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationOutcome {
    /// Final location of the file
    pub destination: PathBuf,

    /// Strategy that succeeded
    pub strategy: RelocationStrategy,

    /// False when the copy succeeded but deleting the source failed
    pub source_removed: bool,
}

/// Moves files between arbitrary storage locations
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRelocator;

impl FileRelocator {
    /// Creates a relocator
    pub fn new() -> Self {
        Self
    }

    /// Move `src` to `dst`
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing or the copy fallback fails.
    /// A failed copy leaves both the source and any existing destination
    /// untouched.
    pub async fn relocate(&self, src: &Path, dst: &Path) -> Result<RelocationOutcome> {
        if let Some(parent) = dst.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    RetouchError::Io(format!(
                        "Failed to create destination directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        match tokio::fs::rename(src, dst).await {
            Ok(()) => {
                tracing::debug!(src = %src.display(), dst = %dst.display(), "Renamed file");
                return Ok(RelocationOutcome {
                    destination: dst.to_path_buf(),
                    strategy: RelocationStrategy::Rename,
                    source_removed: true,
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound && !src.exists() => {
                return Err(RetouchError::Io(format!(
                    "Source file {} does not exist",
                    src.display()
                )));
            }
            Err(e) => {
                tracing::debug!(
                    src = %src.display(),
                    dst = %dst.display(),
                    error = %e,
                    "Rename failed, falling back to copy"
                );
            }
        }

        copy_then_delete(src, dst).await
    }
}

/// Copy `src` over `dst`, then remove `src`
///
/// The copy goes to a sibling temporary file that is renamed onto `dst`, so a
/// failed copy never leaves `dst` partially written. Failure to remove the
/// source afterwards is reported through `source_removed`, not as an error.
pub async fn copy_then_delete(src: &Path, dst: &Path) -> Result<RelocationOutcome> {
    let staging = staging_path(dst);
    let copied = match tokio::fs::copy(src, &staging).await {
        Ok(_) => tokio::fs::rename(&staging, dst).await,
        Err(e) => Err(e),
    };
    if let Err(e) = copied {
        if let Err(cleanup) = tokio::fs::remove_file(&staging).await {
            if cleanup.kind() != ErrorKind::NotFound {
                tracing::warn!(
                    staging = %staging.display(),
                    error = %cleanup,
                    "Failed to remove partial copy"
                );
            }
        }
        return Err(RetouchError::Io(format!(
            "Failed to copy {} to {}: {e}",
            src.display(),
            dst.display()
        )));
    }

    let source_removed = match tokio::fs::remove_file(src).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                src = %src.display(),
                error = %e,
                "Copied file but could not remove source"
            );
            false
        }
    };

    Ok(RelocationOutcome {
        destination: dst.to_path_buf(),
        strategy: RelocationStrategy::CopyThenDelete,
        source_removed,
    })
}

fn staging_path(dst: &Path) -> PathBuf {
    let name = dst
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dst.with_file_name(format!(".{name}.retouch-tmp"))
}
