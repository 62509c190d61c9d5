//! Pass-through exporter
//!
//! Copies each item's origin into a per-run scratch directory. No pixel
//! conversion is performed: the requested format must be `original` or the
//! format the origin is already in.

use crate::adapters::traits::Exporter;
use crate::core::fs::PathResolver;
use crate::domain::item::{ExportFormat, ExportedFile, Item};
use crate::domain::{Result, RetouchError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Exporter writing plain copies into a scratch directory
#[derive(Debug, Clone)]
pub struct LocalExporter {
    scratch_dir: PathBuf,
}

impl LocalExporter {
    /// Create a fresh `retouch-<uuid>` scratch directory under `base`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn in_scratch(base: &Path) -> Result<Self> {
        let scratch_dir = base.join(format!("retouch-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&scratch_dir).await.map_err(|e| {
            RetouchError::Io(format!(
                "Failed to create scratch directory {}: {e}",
                scratch_dir.display()
            ))
        })?;
        tracing::debug!(scratch_dir = %scratch_dir.display(), "Created scratch directory");
        Ok(Self { scratch_dir })
    }

    /// Directory receiving exported files
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    fn failure(item: &Item, reason: impl Into<String>) -> RetouchError {
        RetouchError::ExportFailure {
            item: item.id.to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Exporter for LocalExporter {
    async fn export(
        &self,
        item: &Item,
        format: ExportFormat,
        bit_depth: u8,
    ) -> Result<ExportedFile> {
        let extension = item
            .origin
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !format.matches_extension(&extension) {
            return Err(Self::failure(
                item,
                format!("cannot convert .{extension} to {format} without a converter"),
            ));
        }

        let file_name = item
            .origin
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Self::failure(item, "origin has no file name"))?;

        // Two items from different folders may share a file name
        let target = PathResolver::new().resolve(&self.scratch_dir, &file_name);
        if !target.resolved {
            return Err(Self::failure(item, "scratch directory is full for this name"));
        }

        tokio::fs::copy(&item.origin, &target.path)
            .await
            .map_err(|e| Self::failure(item, format!("{}: {e}", item.origin.display())))?;

        tracing::debug!(
            item_id = %item.id,
            exported = %target.path.display(),
            format = %format,
            bit_depth,
            "Exported item"
        );
        Ok(ExportedFile::new(target.path, format, bit_depth))
    }

    async fn finish(&self) -> Result<()> {
        // Only removes the directory when nothing was left behind
        match tokio::fs::remove_dir(&self.scratch_dir).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::debug!(
                    scratch_dir = %self.scratch_dir.display(),
                    error = %e,
                    "Scratch directory kept"
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::ItemBuilder;
    use std::fs;
    use tempfile::TempDir;

    fn item_at(path: &Path) -> Item {
        ItemBuilder::new().origin(path).build().unwrap()
    }

    #[tokio::test]
    async fn test_export_original_copies_file() {
        let photos = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let origin = photos.path().join("IMG_1.jpg");
        fs::write(&origin, b"pixels").unwrap();

        let exporter = LocalExporter::in_scratch(scratch.path()).await.unwrap();
        let exported = exporter
            .export(&item_at(&origin), ExportFormat::Original, 8)
            .await
            .unwrap();

        assert_eq!(exported.file_name(), "IMG_1.jpg");
        assert!(exported.path.starts_with(exporter.scratch_dir()));
        assert_eq!(fs::read(&exported.path).unwrap(), b"pixels");
        assert!(origin.exists());
    }

    #[tokio::test]
    async fn test_export_same_name_twice_gets_suffix() {
        let photos = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        fs::create_dir(photos.path().join("a")).unwrap();
        fs::create_dir(photos.path().join("b")).unwrap();
        let first = photos.path().join("a").join("IMG.jpg");
        let second = photos.path().join("b").join("IMG.jpg");
        fs::write(&first, b"1").unwrap();
        fs::write(&second, b"2").unwrap();

        let exporter = LocalExporter::in_scratch(scratch.path()).await.unwrap();
        let one = exporter
            .export(&item_at(&first), ExportFormat::Original, 8)
            .await
            .unwrap();
        let two = exporter
            .export(&item_at(&second), ExportFormat::Original, 8)
            .await
            .unwrap();

        assert_eq!(one.file_name(), "IMG.jpg");
        assert_eq!(two.file_name(), "IMG_01.jpg");
    }

    #[tokio::test]
    async fn test_export_conversion_unsupported() {
        let photos = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let origin = photos.path().join("IMG_1.jpg");
        fs::write(&origin, b"pixels").unwrap();

        let exporter = LocalExporter::in_scratch(scratch.path()).await.unwrap();
        let result = exporter
            .export(&item_at(&origin), ExportFormat::Tiff, 16)
            .await;

        assert!(matches!(result, Err(RetouchError::ExportFailure { .. })));
    }

    #[tokio::test]
    async fn test_export_missing_origin_fails() {
        let scratch = TempDir::new().unwrap();
        let exporter = LocalExporter::in_scratch(scratch.path()).await.unwrap();
        let result = exporter
            .export(&item_at(Path::new("/no/such/IMG.jpg")), ExportFormat::Original, 8)
            .await;

        assert!(matches!(result, Err(RetouchError::ExportFailure { .. })));
    }

    #[tokio::test]
    async fn test_finish_removes_empty_scratch() {
        let scratch = TempDir::new().unwrap();
        let exporter = LocalExporter::in_scratch(scratch.path()).await.unwrap();
        let dir = exporter.scratch_dir().to_path_buf();

        exporter.finish().await.unwrap();
        assert!(!dir.exists());
    }
}
