//! Content selection: turns configuration + a content source into the
//! ordered, filtered, deduplicated groups both renderers consume.

use std::collections::{HashMap, HashSet};

use crate::export::config::SelectionConfig;
use crate::export::rules::normalize_path;
use crate::export::seo::SeoResolver;
use crate::export::source::{ContentItem, ContentSource, ContentType, ItemStatus, StatusFilter, TypeKind};

pub const ADDITIONAL_URLS_TAG: &str = "additional-urls";
pub const ADDITIONAL_URLS_LABEL: &str = "Additional URLs";

/// One content-type worth of selected items, in output order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub tag: String,
    pub label: String,
    pub items: Vec<ContentItem>,
}

/// The URL that include/exclude and robots rules are matched against: the
/// direct file URL for media items, the canonical page URL otherwise.
pub fn matching_url(item: &ContentItem) -> &str {
    item.file.as_ref().map(|f| f.url.as_str()).unwrap_or(item.url.as_str())
}

fn dedup_key(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Selects and orders content per the configuration.
///
/// Groups come out in configured type order (selected types missing from the
/// explicit order are appended), followed by the capped Additional URLs group
/// and any `*.ext` scan groups. Every emitted group is non-empty, and no URL
/// appears in more than one group.
pub async fn select_content(
    config: &SelectionConfig,
    source: &dyn ContentSource,
    seo: &SeoResolver<'_>,
) -> Vec<Group> {
    let all_types = source.content_types();
    let by_tag: HashMap<&str, &ContentType> = all_types.iter().map(|t| (t.tag.as_str(), t)).collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut groups: Vec<Group> = Vec::new();

    for tag in &config.types {
        let Some(content_type) = by_tag.get(tag.as_str()) else {
            tracing::debug!(%tag, "skipping unknown content type");
            continue;
        };
        let filter = match content_type.kind {
            TypeKind::Media => StatusFilter::Inherited,
            TypeKind::Standard => StatusFilter::Published,
        };
        let items = match source.items(tag, filter) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(%tag, error = %e, "content source failure, leaving group empty");
                Vec::new()
            }
        };

        let mut kept = Vec::new();
        for item in items {
            if !admit(&item, config, seo).await {
                continue;
            }
            if !seen.insert(dedup_key(&item.url)) {
                continue;
            }
            kept.push(item);
        }
        if !kept.is_empty() {
            groups.push(Group {
                tag: tag.clone(),
                label: content_type.label.clone(),
                items: kept,
            });
        }
    }

    let manual = select_manual_urls(config, source, seo, &mut seen).await;
    if !manual.is_empty() {
        groups.push(Group {
            tag: ADDITIONAL_URLS_TAG.to_string(),
            label: ADDITIONAL_URLS_LABEL.to_string(),
            items: manual,
        });
    }

    for ext in &config.scan_extensions {
        let items = match source.media_with_extension(ext) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(%ext, error = %e, "file scan failed, skipping extension");
                continue;
            }
        };
        let mut kept = Vec::new();
        for item in items {
            if !admit(&item, config, seo).await {
                continue;
            }
            if !seen.insert(dedup_key(&item.url)) {
                continue;
            }
            kept.push(item);
        }
        if !kept.is_empty() {
            groups.push(Group {
                tag: format!("scan:{ext}"),
                label: format!("{} Files", ext.to_uppercase()),
                items: kept,
            });
        }
    }

    groups
}

/// SEO + exclude gate shared by type listings and file scans.
async fn admit(item: &ContentItem, config: &SelectionConfig, seo: &SeoResolver<'_>) -> bool {
    let url = matching_url(item);
    if config.respect_seo {
        if seo.is_noindexed(item.id) {
            return false;
        }
        if seo.is_robots_disallowed(url).await {
            return false;
        }
    }
    !config.exclude.matches(url)
}

/// Builds the Additional URLs group from literal include entries, capped.
async fn select_manual_urls(
    config: &SelectionConfig,
    source: &dyn ContentSource,
    seo: &SeoResolver<'_>,
    seen: &mut HashSet<String>,
) -> Vec<ContentItem> {
    let base_url = source.site().base_url.clone();
    let mut manual = Vec::new();
    for raw in &config.manual_urls {
        if manual.len() >= config.manual_url_cap {
            break;
        }
        let url = absolutize(raw, &base_url);
        if config.respect_seo && seo.is_robots_disallowed(&url).await {
            continue;
        }
        if config.exclude.matches(&url) {
            continue;
        }
        if !seen.insert(dedup_key(&url)) {
            continue;
        }
        manual.push(manual_item(url));
    }
    manual
}

fn absolutize(entry: &str, base_url: &str) -> String {
    let entry = entry.trim();
    if entry.starts_with("http") {
        entry.to_string()
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), entry.trim_start_matches('/'))
    }
}

fn manual_item(url: String) -> ContentItem {
    ContentItem {
        id: 0,
        type_tag: ADDITIONAL_URLS_TAG.to_string(),
        title: manual_title(&url),
        url,
        body: String::new(),
        excerpt: None,
        password_protected: false,
        status: ItemStatus::Published,
        file: None,
    }
}

/// Humanizes the URL's last path segment into a display title, or "Home"
/// for the root path.
fn manual_title(url: &str) -> String {
    let path = normalize_path(url);
    let segment = path.trim_matches('/').rsplit('/').next().unwrap_or("");
    if segment.is_empty() {
        return "Home".to_string();
    }
    segment
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
