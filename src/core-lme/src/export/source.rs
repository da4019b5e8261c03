//! The content-repository collaborator: the trait the selector reads from,
//! and a JSON site-export implementation of it.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::export::config::SiteHeader;
use crate::export::errors::{ExportError, Result};

pub type ItemId = u64;

/// Errors a content repository can surface. A failure for one content type
/// never aborts a generation run; the selector logs it and moves on.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unknown content type: {0}")]
    UnknownType(String),

    #[error("content repository failure: {0}")]
    Repository(String),
}

/// Publication status of an item as recorded in the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Published,
    /// Media entries take their visibility from their parent.
    Inherit,
    Draft,
    Private,
}

/// Which statuses a listing admits: published items for ordinary types,
/// inherited-status items for media types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Published,
    Inherited,
}

impl StatusFilter {
    pub fn admits(self, status: ItemStatus) -> bool {
        match self {
            StatusFilter::Published => status == ItemStatus::Published,
            StatusFilter::Inherited => status == ItemStatus::Inherit,
        }
    }
}

/// Whether a content type holds ordinary documents or media files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Standard,
    Media,
}

/// A named category of content items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentType {
    pub tag: String,
    pub label: String,
    #[serde(default)]
    pub kind: TypeKind,
}

/// File details carried by media items. Exclude rules are matched against
/// `url` (the direct file URL), not the item's page URL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileMeta {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single publishable entry, immutable once read from the repository.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub title: String,
    /// Canonical page URL, used for display and deduplication.
    pub url: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub password_protected: bool,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub file: Option<FileMeta>,
}

/// Site-level fields of the export.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Public root of the site; robots.txt is fetched relative to this.
    pub base_url: String,
    /// Site-wide "discourage indexing" flag.
    #[serde(default)]
    pub discourage_indexing: bool,
}

impl SiteInfo {
    pub fn header(&self) -> SiteHeader {
        SiteHeader {
            name: self.name.clone(),
            tagline: self.tagline.clone(),
            contact_email: self.contact_email.clone(),
        }
    }
}

/// Read-only view of the local content repository.
///
/// Implementations supply publicly visible items per content type plus the
/// per-item metadata the SEO providers consult.
pub trait ContentSource {
    fn site(&self) -> &SiteInfo;

    fn content_types(&self) -> &[ContentType];

    /// All items of one type admitted by the status filter, in the
    /// repository's natural order.
    fn items(&self, tag: &str, filter: StatusFilter) -> std::result::Result<Vec<ContentItem>, SourceError>;

    /// Media items whose file URL carries the given extension, for `*.ext`
    /// scan directives.
    fn media_with_extension(&self, ext: &str) -> std::result::Result<Vec<ContentItem>, SourceError>;

    /// Per-item metadata lookup keyed by item id.
    fn meta(&self, id: ItemId, key: &str) -> Option<Value>;
}

#[derive(Debug, Clone, Deserialize)]
struct Record {
    #[serde(flatten)]
    item: ContentItem,
    #[serde(default)]
    meta: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Export {
    site: SiteInfo,
    #[serde(default)]
    types: Vec<ContentType>,
    #[serde(default)]
    items: Vec<Record>,
}

/// Content repository backed by a single site-export JSON document.
#[derive(Debug)]
pub struct JsonContentSource {
    site: SiteInfo,
    types: Vec<ContentType>,
    records: Vec<Record>,
}

impl JsonContentSource {
    pub fn load(path: &Path) -> Result<JsonContentSource> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn from_json(text: &str) -> Result<JsonContentSource> {
        let export: Export = serde_json::from_str(text).map_err(ExportError::from)?;
        Ok(JsonContentSource {
            site: export.site,
            types: export.types,
            records: export.items,
        })
    }
}

impl ContentSource for JsonContentSource {
    fn site(&self) -> &SiteInfo {
        &self.site
    }

    fn content_types(&self) -> &[ContentType] {
        &self.types
    }

    fn items(&self, tag: &str, filter: StatusFilter) -> std::result::Result<Vec<ContentItem>, SourceError> {
        if !self.types.iter().any(|t| t.tag == tag) {
            return Err(SourceError::UnknownType(tag.to_string()));
        }
        Ok(self
            .records
            .iter()
            .filter(|r| r.item.type_tag == tag && filter.admits(r.item.status))
            .map(|r| r.item.clone())
            .collect())
    }

    fn media_with_extension(&self, ext: &str) -> std::result::Result<Vec<ContentItem>, SourceError> {
        let suffix = format!(".{}", ext.to_ascii_lowercase());
        Ok(self
            .records
            .iter()
            .filter(|r| {
                StatusFilter::Inherited.admits(r.item.status)
                    && r.item.file.as_ref().is_some_and(|f| f.url.to_ascii_lowercase().ends_with(&suffix))
            })
            .map(|r| r.item.clone())
            .collect())
    }

    fn meta(&self, id: ItemId, key: &str) -> Option<Value> {
        self.records.iter().find(|r| r.item.id == id).and_then(|r| r.meta.get(key).cloned())
    }
}
