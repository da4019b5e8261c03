//! # llms.txt Manifest Export
//!
//! Exports a site's publishable content into the two plain-text manifests
//! consumed by language-model crawlers: a link index (`llms.txt`) and a
//! full-text dump (`llms-full.txt`).
//!
//! The pipeline reads a local content repository, selects items per the
//! configured content types and URL rules, drops anything the site's SEO
//! configuration hides (noindex metadata, robots.txt disallows), and renders
//! two deterministic text documents written whole-file, UTF-8 with BOM.
//!
//! ## Features
//!
//! - Ordered content-type groups with drag-configured ordering
//! - Include/exclude URL rules: exact paths and `*` wildcards
//! - `*.ext` include directives that scan for media files by extension
//! - Up to three manually declared URLs in a synthetic group
//! - Noindex detection across four third-party SEO plugin conventions
//! - Once-per-run robots.txt fetch, fail-open on any network problem
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use core_lme::export::{JsonContentSource, Settings, generate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load(Path::new("settings.json"))?;
//!     let source = JsonContentSource::load(Path::new("site-export.json"))?;
//!     let files = settings.output_files()?;
//!
//!     let report = generate(&settings, &source, Path::new("."), &files).await?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod errors;
pub mod generator;
pub mod output;
pub mod render;
pub mod robots;
pub mod rules;
pub mod sanitize;
pub mod selector;
pub mod seo;
pub mod source;

// Public API re-exports
pub use config::{Frequency, MANUAL_URL_CAP, OutputFile, SelectionConfig, Settings, SiteHeader, parse_output_files};
pub use errors::{ExportError, Result};
pub use generator::{GenerationReport, generate, render_manifest};
pub use source::{ContentItem, ContentSource, JsonContentSource, SourceError};

// Additional exports for advanced usage
pub use output::{delete_manifest, write_manifest};
pub use render::{RenderOptions, render_full, render_links};
pub use robots::{RobotsCache, RobotsRules};
pub use rules::{RuleSet, UrlRule};
pub use selector::{Group, select_content};
pub use seo::{SeoProvider, SeoResolver};
