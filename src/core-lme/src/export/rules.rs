//! URL rule parsing and matching.
//!
//! Rules and candidate URLs are both normalized to a relative path (scheme and
//! host stripped, query/fragment dropped, single leading slash) before
//! matching. A rule containing `*` compiles to a case-insensitive anchored
//! regex with each `*` matching any sequence; a rule without one matches only
//! the exact path, insensitive to a trailing slash. Subtree exclusion is
//! spelled `/path/*`, never implied by a bare path.

use regex::Regex;
use url::Url;

/// Normalizes a URL or rule pattern to its relative path.
///
/// # Examples
///
/// ```
/// # use core_lme::export::rules::normalize_path;
/// assert_eq!(normalize_path("https://example.com/docs/?q=1"), "/docs/");
/// assert_eq!(normalize_path("about#team"), "/about");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(target: &str) -> String {
    let target = target.trim();
    let path = match Url::parse(target) {
        Ok(parsed) if parsed.has_host() => parsed.path().to_string(),
        _ => {
            let end = target.find(['?', '#']).unwrap_or(target.len());
            target[..end].to_string()
        }
    };
    if path.starts_with('/') { path } else { format!("/{path}") }
}

/// Detects a bare `*.ext` file-scan directive.
///
/// These are handled by the selector as "scan for files with this extension"
/// and never participate in ordinary include matching.
pub fn file_scan_extension(pattern: &str) -> Option<&str> {
    let ext = pattern.trim().strip_prefix("*.")?;
    let valid = !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(ext)
}

/// A single configured URL rule.
#[derive(Debug, Clone)]
pub enum UrlRule {
    /// Matches one normalized path exactly (trailing slash ignored).
    Exact(String),
    /// `*`-pattern compiled to an anchored case-insensitive regex.
    Wildcard(Regex),
}

impl UrlRule {
    /// Parses one pattern line. Empty lines yield no rule.
    pub fn parse(pattern: &str) -> Option<UrlRule> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return None;
        }
        let path = normalize_path(pattern);
        if path.contains('*') {
            let escaped = regex::escape(&path).replace(r"\*", ".*");
            let regex = Regex::new(&format!("(?i)^{escaped}$")).ok()?;
            Some(UrlRule::Wildcard(regex))
        } else {
            Some(UrlRule::Exact(path.trim_end_matches('/').to_string()))
        }
    }

    /// True if the URL's normalized path matches this rule.
    pub fn matches(&self, url: &str) -> bool {
        let path = normalize_path(url);
        match self {
            UrlRule::Exact(rule) => path.trim_end_matches('/') == rule,
            UrlRule::Wildcard(regex) => regex.is_match(&path),
        }
    }
}

/// An ordered set of rules, one pattern per line in the source text.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<UrlRule>,
}

impl RuleSet {
    pub fn parse(lines: &str) -> RuleSet {
        RuleSet {
            rules: lines.lines().filter_map(UrlRule::parse).collect(),
        }
    }

    pub fn matches(&self, url: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(url))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
