//! Generation orchestration: one run-to-completion pass from settings +
//! content source to written manifest files.

use std::path::Path;

use crate::export::config::{OutputFile, Settings, SiteHeader};
use crate::export::errors::Result;
use crate::export::output::write_manifest;
use crate::export::render::{RenderOptions, render_full, render_links};
use crate::export::robots::RobotsCache;
use crate::export::selector::{Group, select_content};
use crate::export::seo::SeoResolver;
use crate::export::source::ContentSource;

/// What a generation run produced, reported back to the trigger boundary.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Files actually (re)written, in request order.
    pub written: Vec<OutputFile>,
    /// Informational messages for the caller (e.g. empty type selection).
    pub notes: Vec<String>,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        match self.written.as_slice() {
            [] => "No files were generated.".to_string(),
            [one] => format!("Generated {one} successfully."),
            many => {
                let names: Vec<&str> = many.iter().map(|f| f.file_name()).collect();
                format!("Generated {} successfully.", names.join(" and "))
            }
        }
    }
}

struct Prepared {
    header: SiteHeader,
    groups: Vec<Group>,
    notes: Vec<String>,
    /// Set when the type selection was empty: the outputs carry the site
    /// header and nothing else.
    header_only: bool,
}

async fn prepare(settings: &Settings, source: &dyn ContentSource) -> Prepared {
    let config = settings.selection();
    let site = source.site();

    let mut header = site.header();
    if !settings.include_contact_email {
        header.contact_email = None;
    } else if settings.contact_email.as_deref().is_some_and(|e| !e.trim().is_empty()) {
        header.contact_email = settings.contact_email.clone();
    }

    let mut notes = Vec::new();
    let header_only = config.types.is_empty();
    let groups = if header_only {
        tracing::info!("no content types selected, manifests will carry the header only");
        notes.push("No content types selected. Generated files contain the site header only.".to_string());
        Vec::new()
    } else {
        let seo = SeoResolver::new(source, RobotsCache::new(site.base_url.clone()));
        select_content(&config, source, &seo).await
    };

    Prepared {
        header,
        groups,
        notes,
        header_only,
    }
}

fn render_one(file: OutputFile, prepared: &Prepared, options: &RenderOptions) -> String {
    match file {
        OutputFile::Links => render_links(&prepared.groups, &prepared.header, options),
        OutputFile::Full => render_full(&prepared.groups, &prepared.header, options),
    }
}

/// Renders one manifest without writing anything. The cross-link to the full
/// export is omitted since only a single document is produced.
pub async fn render_manifest(settings: &Settings, source: &dyn ContentSource, file: OutputFile) -> String {
    let prepared = prepare(settings, source).await;
    let options = RenderOptions {
        include_excerpt: settings.include_excerpt,
        full_export_url: None,
    };
    render_one(file, &prepared, &options)
}

/// Runs one generation pass and writes the requested manifests.
///
/// Content is selected once and rendered per requested file; each file is
/// then rewritten wholesale. A write failure surfaces as an error with no
/// retry; files written before the failure stay written.
pub async fn generate(
    settings: &Settings,
    source: &dyn ContentSource,
    out_dir: &Path,
    files: &[OutputFile],
) -> Result<GenerationReport> {
    let mut requested: Vec<OutputFile> = Vec::new();
    for file in files {
        if !requested.contains(file) {
            requested.push(*file);
        }
    }

    let prepared = prepare(settings, source).await;

    let cross_link = requested.contains(&OutputFile::Links)
        && requested.contains(&OutputFile::Full)
        && !prepared.header_only;
    let base_url = source.site().base_url.trim_end_matches('/').to_string();

    let mut report = GenerationReport {
        written: Vec::new(),
        notes: prepared.notes.clone(),
    };

    for file in requested {
        let options = RenderOptions {
            include_excerpt: settings.include_excerpt,
            full_export_url: (file == OutputFile::Links && cross_link)
                .then(|| format!("{base_url}/{}", OutputFile::Full.file_name())),
        };
        let content = render_one(file, &prepared, &options);
        write_manifest(out_dir, file, &content).await?;
        report.written.push(file);
    }

    tracing::info!("{}", report.summary());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_summary() {
        let report = GenerationReport {
            written: vec![OutputFile::Links],
            notes: vec![],
        };
        assert_eq!(report.summary(), "Generated llms.txt successfully.");

        let report = GenerationReport {
            written: vec![OutputFile::Links, OutputFile::Full],
            notes: vec![],
        };
        assert_eq!(report.summary(), "Generated llms.txt and llms-full.txt successfully.");

        assert_eq!(GenerationReport::default().summary(), "No files were generated.");
    }
}
