//! Item domain model
//!
//! Managed catalog items, the temporary files exported for them, and the
//! run mode of the external editor.

use super::errors::RetouchError;
use super::ids::{ItemId, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A managed asset in the catalog
///
/// # Examples
///
/// ```
/// use retouch::domain::item::ItemBuilder;
///
/// let item = ItemBuilder::new()
///     .origin("/photos/2024/IMG_0001.jpg")
///     .tag("places|lisbon")
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(item.group_id, item.id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier
    pub id: ItemId,

    /// Where the file lives
    pub origin: PathBuf,

    /// Tags attached to the item
    #[serde(default)]
    pub tags: BTreeSet<Tag>,

    /// Leader of the group this item belongs to (its own id when ungrouped)
    pub group_id: ItemId,

    /// When the item entered the catalog
    pub imported_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new builder for constructing an Item
    pub fn builder() -> ItemBuilder {
        ItemBuilder::default()
    }

    /// Directory containing the origin file
    pub fn origin_dir(&self) -> &Path {
        self.origin.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Short human-readable label for progress output
    pub fn label(&self) -> String {
        self.origin
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Builder for constructing Item instances
#[derive(Debug, Default)]
pub struct ItemBuilder {
    id: Option<ItemId>,
    origin: Option<PathBuf>,
    tags: BTreeSet<Tag>,
    group_id: Option<ItemId>,
    imported_at: Option<DateTime<Utc>>,
}

impl ItemBuilder {
    /// Creates a new ItemBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item ID (generated when omitted)
    pub fn id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the origin path
    pub fn origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Adds a tag
    pub fn tag(mut self, tag: &str) -> Result<Self, String> {
        self.tags.insert(Tag::new(tag)?);
        Ok(self)
    }

    /// Sets the group leader
    pub fn group_id(mut self, group_id: ItemId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Sets the import timestamp
    pub fn imported_at(mut self, imported_at: DateTime<Utc>) -> Self {
        self.imported_at = Some(imported_at);
        self
    }

    /// Builds the Item
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is missing
    pub fn build(self) -> Result<Item, String> {
        let id = self.id.unwrap_or_else(ItemId::generate);
        Ok(Item {
            group_id: self.group_id.unwrap_or_else(|| id.clone()),
            id,
            origin: self.origin.ok_or("origin is required")?,
            tags: self.tags,
            imported_at: self.imported_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Output format requested from the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Keep the source encoding
    Original,
    /// TIFF
    Tiff,
    /// JPEG
    Jpeg,
    /// PNG
    Png,
}

impl ExportFormat {
    /// File extensions accepted for this format, preferred first
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ExportFormat::Original => &[],
            ExportFormat::Tiff => &["tif", "tiff"],
            ExportFormat::Jpeg => &["jpg", "jpeg"],
            ExportFormat::Png => &["png"],
        }
    }

    /// Whether a file with the given extension is already in this format
    pub fn matches_extension(&self, ext: &str) -> bool {
        match self {
            ExportFormat::Original => true,
            other => other
                .extensions()
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext)),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = RetouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "original" => Ok(Self::Original),
            "tif" | "tiff" => Ok(Self::Tiff),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(RetouchError::Configuration(format!(
                "Invalid export format: {s}. Expected 'original', 'tiff', 'jpeg' or 'png'"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Original => "original",
            ExportFormat::Tiff => "tiff",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Png => "png",
        };
        f.write_str(name)
    }
}

/// Temporary artifact produced for one item before the tool runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Path of the exported file
    pub path: PathBuf,

    /// Format it was written in
    pub format: ExportFormat,

    /// Bits per channel requested from the exporter
    pub bit_depth: u8,
}

impl ExportedFile {
    /// Creates a new ExportedFile
    pub fn new(path: impl Into<PathBuf>, format: ExportFormat, bit_depth: u8) -> Self {
        Self {
            path: path.into(),
            format,
            bit_depth,
        }
    }

    /// File name used when the file is moved back beside its original
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// How the external editor is run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Wait for the tool to exit, then reconcile its output
    Attached,
    /// Start the tool and return immediately; nothing is reconciled
    Detached,
}

impl RunMode {
    /// Maps the `run_detached` option onto a mode
    pub fn from_detached(run_detached: bool) -> Self {
        if run_detached {
            RunMode::Detached
        } else {
            RunMode::Attached
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Attached => f.write_str("attached"),
            RunMode::Detached => f.write_str("detached"),
        }
    }
}
