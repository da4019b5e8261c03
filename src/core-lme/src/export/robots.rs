//! robots.txt fetching, parsing, and per-run caching.
//!
//! The directives are fetched at most once per generation run through an
//! explicit [`RobotsCache`] owned by that run. Any fetch problem (network
//! error, non-200, unreadable body) fails open: no rules, nothing blocked.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::OnceCell;

use crate::export::rules::normalize_path;

/// Upper bound on the single robots.txt fetch.
pub const ROBOTS_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Parsed robots directives, grouped by user-agent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RobotsRules {
    groups: HashMap<String, Vec<String>>,
}

impl RobotsRules {
    /// Parses robots.txt text. Only `User-agent` and `Disallow` lines are
    /// interpreted; empty Disallow values and comment lines are ignored.
    /// Disallow lines before any User-agent line fall under `*`.
    pub fn parse(text: &str) -> RobotsRules {
        let mut groups: HashMap<String, Vec<String>> = HashMap::new();
        let mut current = "*".to_string();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            if field.trim().eq_ignore_ascii_case("user-agent") {
                current = value.to_string();
                groups.entry(current.clone()).or_default();
            } else if field.trim().eq_ignore_ascii_case("disallow") && !value.is_empty() {
                groups.entry(current.clone()).or_default().push(value.to_string());
            }
        }
        RobotsRules { groups }
    }

    /// True if the wildcard-agent group disallows the URL's path: `/`
    /// disallows everything, any other rule matches as a path prefix.
    pub fn is_disallowed(&self, url: &str) -> bool {
        let Some(rules) = self.groups.get("*") else {
            return false;
        };
        let path = normalize_path(url);
        rules.iter().any(|rule| {
            let rule = normalize_path(rule);
            rule == "/" || path.starts_with(rule.as_str())
        })
    }
}

/// Once-per-run robots.txt memo. Construct one per generation run and drop
/// it with the run.
#[derive(Debug)]
pub struct RobotsCache {
    base_url: String,
    rules: OnceCell<RobotsRules>,
}

impl RobotsCache {
    pub fn new(base_url: impl Into<String>) -> RobotsCache {
        RobotsCache {
            base_url: base_url.into(),
            rules: OnceCell::new(),
        }
    }

    /// Cache primed with already-parsed rules; no fetch will happen.
    pub fn preloaded(rules: RobotsRules) -> RobotsCache {
        RobotsCache {
            base_url: String::new(),
            rules: OnceCell::new_with(Some(rules)),
        }
    }

    /// Checks the URL against the site's robots directives, fetching them on
    /// first use.
    pub async fn is_disallowed(&self, url: &str) -> bool {
        self.rules.get_or_init(|| fetch_rules(&self.base_url)).await.is_disallowed(url)
    }
}

/// Fetches and parses `<base_url>/robots.txt`, failing open on any problem.
async fn fetch_rules(base_url: &str) -> RobotsRules {
    let robots_url = format!("{}/robots.txt", base_url.trim_end_matches('/'));

    let client = match reqwest::Client::builder().timeout(ROBOTS_FETCH_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!("robots.txt client setup failed ({e}), treating site as unrestricted");
            return RobotsRules::default();
        }
    };

    match client.get(&robots_url).send().await {
        Ok(response) if response.status() == reqwest::StatusCode::OK => match response.text().await {
            Ok(body) => RobotsRules::parse(&body),
            Err(e) => {
                tracing::warn!("robots.txt body unreadable ({e}), treating site as unrestricted");
                RobotsRules::default()
            }
        },
        Ok(response) => {
            tracing::warn!(
                "robots.txt returned {}, treating site as unrestricted",
                response.status()
            );
            RobotsRules::default()
        }
        Err(e) => {
            tracing::warn!("robots.txt fetch failed ({e}), treating site as unrestricted");
            RobotsRules::default()
        }
    }
}
