//! Settings persistence and the typed selection configuration derived from it.
//!
//! Boundary payloads (the JSON settings file, REST bodies) deserialize into
//! [`Settings`], which applies a default for every field. The core never sees
//! an open-ended key/value map: [`Settings::selection`] turns the raw fields
//! into a [`SelectionConfig`] with parsed rule sets up front.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::export::errors::{ExportError, Result};
use crate::export::rules::{RuleSet, file_scan_extension};

/// Cap on manually added URLs in the base tier.
pub const MANUAL_URL_CAP: usize = 3;

/// How often the scheduled trigger regenerates the manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    /// Never fires on a schedule; generation happens only on explicit request.
    Manual,
}

impl Frequency {
    /// The cadence period, or `None` for [`Frequency::Manual`].
    pub fn period(self) -> Option<Duration> {
        match self {
            Frequency::Daily => Some(Duration::from_secs(24 * 60 * 60)),
            Frequency::Weekly => Some(Duration::from_secs(7 * 24 * 60 * 60)),
            Frequency::Manual => None,
        }
    }
}

/// The two well-known manifest files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFile {
    /// The link-only manifest, `llms.txt`.
    Links,
    /// The full-text manifest, `llms-full.txt`.
    Full,
}

impl OutputFile {
    pub const ALL: [OutputFile; 2] = [OutputFile::Links, OutputFile::Full];

    pub fn file_name(self) -> &'static str {
        match self {
            OutputFile::Links => "llms.txt",
            OutputFile::Full => "llms-full.txt",
        }
    }

    /// Parses a file name into its manifest, rejecting anything unknown.
    pub fn parse(name: &str) -> Result<OutputFile> {
        match name.trim() {
            "llms.txt" => Ok(OutputFile::Links),
            "llms-full.txt" => Ok(OutputFile::Full),
            other => Err(ExportError::UnknownOutputFile(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Parses a list of requested file names, deduplicated in request order.
///
/// Any name other than the two known manifests is an error; the caller is
/// expected to reject the whole request before any generation work happens.
pub fn parse_output_files(names: &[String]) -> Result<Vec<OutputFile>> {
    let mut files = Vec::new();
    for name in names {
        let file = OutputFile::parse(name)?;
        if !files.contains(&file) {
            files.push(file);
        }
    }
    Ok(files)
}

/// Site metadata attached verbatim to the top of both manifests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteHeader {
    pub name: String,
    pub tagline: String,
    pub contact_email: Option<String>,
}

/// Persisted exporter settings, one JSON file, defaults for every field.
///
/// `include_urls` / `exclude_urls` are textarea-shaped: one pattern per line,
/// blank lines ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Content-type tags to export.
    pub content_types: Vec<String>,
    /// Explicit ordering of the exported types; unlisted selected types are
    /// appended after the listed ones.
    pub type_order: Vec<String>,
    pub include_urls: String,
    pub exclude_urls: String,
    /// Drop items hidden by noindex metadata or robots.txt disallows.
    pub respect_seo: bool,
    /// Append an `Excerpt:` line to full-manifest entries that have one.
    pub include_excerpt: bool,
    pub include_contact_email: bool,
    /// Overrides the site export's contact address when set.
    pub contact_email: Option<String>,
    /// Last-used file selection; also the default for scheduled runs.
    pub files_to_generate: Vec<String>,
    pub update_frequency: Frequency,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            content_types: Vec::new(),
            type_order: Vec::new(),
            include_urls: String::new(),
            exclude_urls: String::new(),
            respect_seo: true,
            include_excerpt: false,
            include_contact_email: true,
            contact_email: None,
            files_to_generate: OutputFile::ALL.iter().map(|f| f.file_name().to_string()).collect(),
            update_frequency: Frequency::Manual,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. A missing file is a valid (default)
    /// configuration; malformed JSON is not.
    pub fn load(path: &Path) -> Result<Settings> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes settings back to the JSON file, whole-file overwrite.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// The configured file selection, parsed and validated.
    pub fn output_files(&self) -> Result<Vec<OutputFile>> {
        parse_output_files(&self.files_to_generate)
    }

    /// Derives the typed configuration the selector consumes.
    pub fn selection(&self) -> SelectionConfig {
        let mut manual_urls = Vec::new();
        let mut scan_extensions: Vec<String> = Vec::new();
        for line in self.include_urls.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(ext) = file_scan_extension(line) {
                let ext = ext.to_ascii_lowercase();
                if !scan_extensions.contains(&ext) {
                    scan_extensions.push(ext);
                }
            } else if !line.contains('*') {
                manual_urls.push(line.to_string());
            }
            // Other wildcard include lines select nothing on their own; type
            // selection is already sufficient inclusion.
        }

        SelectionConfig {
            types: order_types(&self.content_types, &self.type_order),
            exclude: RuleSet::parse(&self.exclude_urls),
            manual_urls,
            scan_extensions,
            respect_seo: self.respect_seo,
            include_excerpt: self.include_excerpt,
            manual_url_cap: MANUAL_URL_CAP,
        }
    }
}

/// Typed configuration consumed by the selector.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Enabled content-type tags, in output order, deduplicated.
    pub types: Vec<String>,
    pub exclude: RuleSet,
    /// Literal include entries, uncapped here; the selector applies the cap.
    pub manual_urls: Vec<String>,
    /// Extensions from `*.ext` scan directives, lowercased, deduplicated.
    pub scan_extensions: Vec<String>,
    pub respect_seo: bool,
    pub include_excerpt: bool,
    pub manual_url_cap: usize,
}

/// Applies the explicit type order to the selected set: ordered types first
/// (those actually selected), then the remaining selected types in their
/// configured order.
fn order_types(selected: &[String], order: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in order {
        if selected.contains(tag) && !out.contains(tag) {
            out.push(tag.clone());
        }
    }
    for tag in selected {
        if !out.contains(tag) {
            out.push(tag.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.respect_seo);
        assert!(!settings.include_excerpt);
        assert_eq!(settings.files_to_generate, vec!["llms.txt", "llms-full.txt"]);
        assert_eq!(settings.update_frequency, Frequency::Manual);
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: Settings = serde_json::from_str(r#"{"content_types": ["post"], "respect_seo": false}"#).unwrap();
        assert_eq!(settings.content_types, vec!["post"]);
        assert!(!settings.respect_seo);
        // Untouched fields keep their defaults.
        assert!(settings.include_contact_email);
        assert_eq!(settings.update_frequency, Frequency::Manual);
    }

    #[test]
    fn test_output_file_parse() {
        assert_eq!(OutputFile::parse("llms.txt").unwrap(), OutputFile::Links);
        assert_eq!(OutputFile::parse("llms-full.txt").unwrap(), OutputFile::Full);
        assert!(OutputFile::parse("evil.txt").is_err());
        assert!(OutputFile::parse("").is_err());
    }

    #[test]
    fn test_parse_output_files_dedupes() {
        let names = vec!["llms.txt".to_string(), "llms.txt".to_string(), "llms-full.txt".to_string()];
        let files = parse_output_files(&names).unwrap();
        assert_eq!(files, vec![OutputFile::Links, OutputFile::Full]);
    }

    #[test]
    fn test_order_types() {
        let selected = vec!["post".to_string(), "page".to_string(), "product".to_string()];
        let order = vec!["page".to_string(), "missing".to_string(), "post".to_string()];
        assert_eq!(order_types(&selected, &order), vec!["page", "post", "product"]);

        // No explicit order keeps the selected order.
        assert_eq!(order_types(&selected, &[]), vec!["post", "page", "product"]);
    }

    #[test]
    fn test_selection_partitions_include_lines() {
        let settings = Settings {
            include_urls: "/about\n*.pdf\n/landing/special\n/wild/*\n\n*.PDF\n".to_string(),
            ..Settings::default()
        };
        let config = settings.selection();
        assert_eq!(config.manual_urls, vec!["/about", "/landing/special"]);
        assert_eq!(config.scan_extensions, vec!["pdf"]);
        assert_eq!(config.manual_url_cap, MANUAL_URL_CAP);
    }

    #[test]
    fn test_frequency_period() {
        assert_eq!(Frequency::Daily.period(), Some(Duration::from_secs(86_400)));
        assert_eq!(Frequency::Weekly.period(), Some(Duration::from_secs(604_800)));
        assert_eq!(Frequency::Manual.period(), None);
    }

    #[test]
    fn test_frequency_serde_names() {
        assert_eq!(serde_json::to_string(&Frequency::Weekly).unwrap(), r#""weekly""#);
        let parsed: Frequency = serde_json::from_str(r#""daily""#).unwrap();
        assert_eq!(parsed, Frequency::Daily);
    }
}
