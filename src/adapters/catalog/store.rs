//! JSON-file catalog
//!
//! Items are kept in memory in import order and written back to disk after
//! every mutation (write to a sibling temp file, then rename).

use crate::adapters::traits::Collection;
use crate::domain::ids::{ItemId, Tag};
use crate::domain::item::{Item, ItemBuilder};
use crate::domain::{Result, RetouchError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const CATALOG_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    version: u32,
    items: Vec<Item>,
}

/// Catalog persisted as a JSON document
pub struct JsonCatalog {
    path: Option<PathBuf>,
    items: Mutex<Vec<Item>>,
}

impl JsonCatalog {
    /// Open the catalog at `path`, starting empty if the file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let items = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let file: CatalogFile = serde_json::from_str(&contents).map_err(|e| {
                    RetouchError::Catalog(format!(
                        "Failed to parse catalog {}: {e}",
                        path.display()
                    ))
                })?;
                if file.version > CATALOG_VERSION {
                    return Err(RetouchError::Catalog(format!(
                        "Catalog {} has unsupported version {}",
                        path.display(),
                        file.version
                    )));
                }
                file.items
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(RetouchError::Catalog(format!(
                    "Failed to read catalog {}: {e}",
                    path.display()
                )))
            }
        };

        tracing::debug!(path = %path.display(), items = items.len(), "Opened catalog");
        Ok(Self {
            path: Some(path),
            items: Mutex::new(items),
        })
    }

    /// Catalog that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            items: Mutex::new(Vec::new()),
        }
    }

    /// Insert a fully built item, replacing any item with the same id
    pub async fn insert(&self, item: Item) -> Result<()> {
        let mut items = self.items.lock().await;
        items.retain(|existing| existing.id != item.id);
        items.push(item);
        self.persist(&items).await
    }

    async fn persist(&self, items: &[Item]) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let file = CatalogFile {
            version: CATALOG_VERSION,
            items: items.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            RetouchError::Catalog(format!("Failed to write catalog {}: {e}", path.display()))
        })?;
        Ok(())
    }
}

fn not_found(id: &ItemId) -> RetouchError {
    RetouchError::Catalog(format!("Item {id} is not in the catalog"))
}

#[async_trait]
impl Collection for JsonCatalog {
    async fn import_file(&self, path: &Path) -> Result<Item> {
        let origin = tokio::fs::canonicalize(path).await.map_err(|e| {
            RetouchError::Catalog(format!("Cannot import {}: {e}", path.display()))
        })?;

        let mut items = self.items.lock().await;
        if let Some(existing) = items.iter().find(|item| item.origin == origin) {
            tracing::debug!(item_id = %existing.id, origin = %origin.display(), "Already imported");
            return Ok(existing.clone());
        }

        let item = ItemBuilder::new()
            .origin(origin)
            .build()
            .map_err(RetouchError::Validation)?;
        items.push(item.clone());
        self.persist(&items).await?;

        tracing::info!(item_id = %item.id, origin = %item.origin.display(), "Imported item");
        Ok(item)
    }

    async fn group_with(&self, leader: &ItemId, member: &ItemId) -> Result<()> {
        let mut items = self.items.lock().await;
        if !items.iter().any(|item| &item.id == leader) {
            return Err(not_found(leader));
        }
        let member_item = items
            .iter_mut()
            .find(|item| &item.id == member)
            .ok_or_else(|| not_found(member))?;

        if &member_item.group_id == leader {
            return Ok(());
        }
        member_item.group_id = leader.clone();
        self.persist(&items).await
    }

    async fn get_tags(&self, item: &ItemId) -> Result<BTreeSet<Tag>> {
        let items = self.items.lock().await;
        items
            .iter()
            .find(|candidate| &candidate.id == item)
            .map(|found| found.tags.clone())
            .ok_or_else(|| not_found(item))
    }

    async fn attach_tag(&self, tag: &Tag, item: &ItemId) -> Result<()> {
        let mut items = self.items.lock().await;
        let target = items
            .iter_mut()
            .find(|candidate| &candidate.id == item)
            .ok_or_else(|| not_found(item))?;

        if target.tags.insert(tag.clone()) {
            self.persist(&items).await?;
        }
        Ok(())
    }

    async fn get(&self, item: &ItemId) -> Result<Option<Item>> {
        let items = self.items.lock().await;
        Ok(items.iter().find(|candidate| &candidate.id == item).cloned())
    }

    async fn find_by_origin(&self, path: &Path) -> Result<Option<Item>> {
        let origin = tokio::fs::canonicalize(path)
            .await
            .unwrap_or_else(|_| path.to_path_buf());
        let items = self.items.lock().await;
        Ok(items.iter().find(|item| item.origin == origin).cloned())
    }

    async fn list(&self) -> Result<Vec<Item>> {
        Ok(self.items.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_import_assigns_self_group() {
        let dir = TempDir::new().unwrap();
        let photo = dir.path().join("IMG_1.jpg");
        fs::write(&photo, b"x").unwrap();

        let catalog = JsonCatalog::in_memory();
        let item = catalog.import_file(&photo).await.unwrap();

        assert_eq!(item.group_id, item.id);
        assert_eq!(item.origin, fs::canonicalize(&photo).unwrap());
    }

    #[tokio::test]
    async fn test_import_same_origin_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let photo = dir.path().join("IMG_1.jpg");
        fs::write(&photo, b"x").unwrap();

        let catalog = JsonCatalog::in_memory();
        let first = catalog.import_file(&photo).await.unwrap();
        let second = catalog.import_file(&photo).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(catalog.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_missing_file_fails() {
        let catalog = JsonCatalog::in_memory();
        let result = catalog.import_file(Path::new("/no/such/photo.jpg")).await;
        assert!(matches!(result, Err(RetouchError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_group_with_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(dir.path().join("b.jpg"), b"x").unwrap();

        let catalog = JsonCatalog::in_memory();
        let leader = catalog.import_file(&dir.path().join("a.jpg")).await.unwrap();
        let member = catalog.import_file(&dir.path().join("b.jpg")).await.unwrap();

        catalog.group_with(&leader.id, &member.id).await.unwrap();
        catalog.group_with(&leader.id, &member.id).await.unwrap();

        let member = catalog.get(&member.id).await.unwrap().unwrap();
        assert_eq!(member.group_id, leader.id);
    }

    #[tokio::test]
    async fn test_group_with_unknown_leader_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        let catalog = JsonCatalog::in_memory();
        let member = catalog.import_file(&dir.path().join("a.jpg")).await.unwrap();

        let ghost = ItemId::new("ghost").unwrap();
        assert!(catalog.group_with(&ghost, &member.id).await.is_err());
    }

    #[tokio::test]
    async fn test_attach_tag_deduplicates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        let catalog = JsonCatalog::in_memory();
        let item = catalog.import_file(&dir.path().join("a.jpg")).await.unwrap();
        let tag = Tag::new("places|lisbon").unwrap();

        catalog.attach_tag(&tag, &item.id).await.unwrap();
        catalog.attach_tag(&tag, &item.id).await.unwrap();

        assert_eq!(catalog.get_tags(&item.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_persisted_catalog_reopens() {
        let dir = TempDir::new().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        let photo = dir.path().join("a.jpg");
        fs::write(&photo, b"x").unwrap();

        let id = {
            let catalog = JsonCatalog::open(&catalog_path).await.unwrap();
            let item = catalog.import_file(&photo).await.unwrap();
            catalog
                .attach_tag(&Tag::new("keep").unwrap(), &item.id)
                .await
                .unwrap();
            item.id
        };

        let reopened = JsonCatalog::open(&catalog_path).await.unwrap();
        let item = reopened.get(&id).await.unwrap().unwrap();
        assert!(item.tags.contains(&Tag::new("keep").unwrap()));
        assert!(reopened.find_by_origin(&photo).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_open_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        fs::write(&catalog_path, b"{not json").unwrap();

        let result = JsonCatalog::open(&catalog_path).await;
        assert!(matches!(result, Err(RetouchError::Catalog(_))));
    }
}
