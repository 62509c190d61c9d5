//! Import command implementation
//!
//! Registers files as catalog items. Directories are walked recursively and
//! every candidate whose file name matches an ignore pattern is skipped.

use crate::adapters::{Collection, JsonCatalog};
use crate::cli::load_settings;
use crate::core::filter::ImportFilter;
use crate::domain::ids::Tag;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Files or directories to import
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Tag to attach to every imported item (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting import command");

        let config = match load_settings(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let tags = match self.parse_tags() {
            Ok(tags) => tags,
            Err(e) => {
                eprintln!("Invalid tag: {e}");
                return Ok(2);
            }
        };

        let filter = ImportFilter::from_config(&config.import)?;
        let candidates = collect_candidates(&self.paths)?;
        let (kept, ignored) = partition(&filter, candidates);

        let catalog = JsonCatalog::open(&config.catalog.path).await?;
        let mut imported = 0usize;
        let mut failed = 0usize;

        for path in &kept {
            match catalog.import_file(path).await {
                Ok(item) => {
                    for tag in &tags {
                        catalog.attach_tag(tag, &item.id).await?;
                    }
                    println!("  + {} {}", item.id, item.origin.display());
                    imported += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Import failed");
                    eprintln!("  ! {}: {e}", path.display());
                    failed += 1;
                }
            }
        }

        println!();
        println!("Import Summary:");
        println!("  Imported: {imported}");
        println!("  Ignored: {}", ignored.len());
        println!("  Failed: {failed}");
        println!();

        tracing::info!(imported, ignored = ignored.len(), failed, "Import finished");
        Ok(if failed > 0 { 1 } else { 0 })
    }

    fn parse_tags(&self) -> Result<Vec<Tag>, String> {
        self.tags.iter().map(|t| Tag::new(t.as_str())).collect()
    }
}

/// Expand directories into the files they contain, recursively and sorted
pub fn collect_candidates(paths: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for entry in entries {
        let file_type = std::fs::symlink_metadata(&entry)?.file_type();
        if file_type.is_symlink() && entry.is_dir() {
            tracing::debug!(path = %entry.display(), "Skipping symlinked directory");
        } else if file_type.is_dir() {
            walk(&entry, files)?;
        } else {
            files.push(entry);
        }
    }
    Ok(())
}

/// Split candidates into kept and ignored by matching their file names
pub fn partition(filter: &ImportFilter, candidates: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
    candidates.into_iter().partition(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        !filter.should_ignore(&name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::PatternSyntax;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_candidates_walks_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.jpg"), b"x").unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(dir.path().join("sub").join("c.jpg"), b"x").unwrap();

        let files = collect_candidates(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_candidates_skips_symlinked_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("a.jpg"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub").join("loop")).unwrap();

        let files = collect_candidates(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files, vec![dir.path().join("sub").join("a.jpg")]);
    }

    #[test]
    fn test_partition_matches_file_names() {
        let filter = ImportFilter::compile(PatternSyntax::Glob, &["*.tmp", "bad_*"]).unwrap();
        let candidates = vec![
            PathBuf::from("/photos/a.tmp"),
            PathBuf::from("/photos/bad_1.jpg"),
            PathBuf::from("/photos/good.jpg"),
        ];

        let (kept, ignored) = partition(&filter, candidates);
        assert_eq!(kept, vec![PathBuf::from("/photos/good.jpg")]);
        assert_eq!(ignored.len(), 2);
    }

    #[test]
    fn test_parse_tags_rejects_blank() {
        let args = ImportArgs {
            paths: vec![PathBuf::from("a.jpg")],
            tags: vec!["ok".to_string(), " ".to_string()],
        };
        assert!(args.parse_tags().is_err());
    }
}
