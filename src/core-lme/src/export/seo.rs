//! SEO signal resolution: per-item noindex metadata and robots directives.
//!
//! Several third-party SEO plugins each record noindex in their own metadata
//! convention. Each convention is one [`SeoProvider`]; the resolver walks the
//! provider list lazily and short-circuits on the first noindex verdict.

use serde_json::Value;

use crate::export::robots::RobotsCache;
use crate::export::source::{ContentSource, ItemId};

/// One third-party noindex convention.
pub trait SeoProvider {
    fn name(&self) -> &'static str;

    /// True if this provider's metadata marks the item noindex.
    fn is_noindexed(&self, source: &dyn ContentSource, id: ItemId) -> bool;
}

fn flag_set(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => matches!(s.as_str(), "1" | "true" | "yes"),
        _ => false,
    }
}

/// Yoast SEO per-post robots meta.
pub struct Yoast;

impl SeoProvider for Yoast {
    fn name(&self) -> &'static str {
        "yoast"
    }

    fn is_noindexed(&self, source: &dyn ContentSource, id: ItemId) -> bool {
        source.meta(id, "_yoast_wpseo_meta-robots-noindex").is_some_and(|v| flag_set(&v))
    }
}

/// Rank Math stores a robots directive list.
pub struct RankMath;

impl SeoProvider for RankMath {
    fn name(&self) -> &'static str {
        "rank-math"
    }

    fn is_noindexed(&self, source: &dyn ContentSource, id: ItemId) -> bool {
        source.meta(id, "rank_math_robots").is_some_and(|v| match v {
            Value::Array(directives) => directives.iter().any(|d| d.as_str() == Some("noindex")),
            _ => false,
        })
    }
}

/// SEOPress marks hidden posts with a literal "yes".
pub struct SeoPress;

impl SeoProvider for SeoPress {
    fn name(&self) -> &'static str {
        "seopress"
    }

    fn is_noindexed(&self, source: &dyn ContentSource, id: ItemId) -> bool {
        source
            .meta(id, "_seopress_robots_index")
            .is_some_and(|v| v.as_str() == Some("yes"))
    }
}

/// All in One SEO noindex flag.
pub struct Aioseo;

impl SeoProvider for Aioseo {
    fn name(&self) -> &'static str {
        "aioseo"
    }

    fn is_noindexed(&self, source: &dyn ContentSource, id: ItemId) -> bool {
        source.meta(id, "_aioseo_noindex").is_some_and(|v| flag_set(&v))
    }
}

/// Plugin-agnostic per-item robots meta.
pub struct CoreMeta;

impl SeoProvider for CoreMeta {
    fn name(&self) -> &'static str {
        "core"
    }

    fn is_noindexed(&self, source: &dyn ContentSource, id: ItemId) -> bool {
        source.meta(id, "_wp_robots_noindex").is_some_and(|v| flag_set(&v))
    }
}

/// The supported provider conventions, checked in order.
pub fn default_providers() -> Vec<Box<dyn SeoProvider>> {
    vec![
        Box::new(Yoast),
        Box::new(RankMath),
        Box::new(SeoPress),
        Box::new(Aioseo),
        Box::new(CoreMeta),
    ]
}

/// Per-run SEO resolver: provider list plus the run's robots cache.
pub struct SeoResolver<'a> {
    source: &'a dyn ContentSource,
    providers: Vec<Box<dyn SeoProvider>>,
    robots: RobotsCache,
}

impl<'a> SeoResolver<'a> {
    pub fn new(source: &'a dyn ContentSource, robots: RobotsCache) -> SeoResolver<'a> {
        Self::with_providers(source, robots, default_providers())
    }

    pub fn with_providers(
        source: &'a dyn ContentSource,
        robots: RobotsCache,
        providers: Vec<Box<dyn SeoProvider>>,
    ) -> SeoResolver<'a> {
        SeoResolver {
            source,
            providers,
            robots,
        }
    }

    /// True if the site-wide discourage flag is set or any provider reports
    /// noindex for the item. Providers are consulted lazily.
    pub fn is_noindexed(&self, id: ItemId) -> bool {
        if self.source.site().discourage_indexing {
            return true;
        }
        self.providers.iter().any(|provider| {
            let hit = provider.is_noindexed(self.source, id);
            if hit {
                tracing::debug!(provider = provider.name(), id, "item flagged noindex");
            }
            hit
        })
    }

    /// True if the site's robots directives disallow the URL.
    pub async fn is_robots_disallowed(&self, url: &str) -> bool {
        self.robots.is_disallowed(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::source::JsonContentSource;
    use indoc::indoc;

    fn source_with_meta() -> JsonContentSource {
        JsonContentSource::from_json(indoc! {r#"
            {
              "site": {"name": "Acme", "base_url": "https://acme.test"},
              "types": [{"tag": "post", "label": "Posts"}],
              "items": [
                {"id": 1, "type": "post", "title": "Open", "url": "/open/"},
                {"id": 2, "type": "post", "title": "Yoast hidden", "url": "/y/",
                 "meta": {"_yoast_wpseo_meta-robots-noindex": "1"}},
                {"id": 3, "type": "post", "title": "Rank Math hidden", "url": "/rm/",
                 "meta": {"rank_math_robots": ["nofollow", "noindex"]}},
                {"id": 4, "type": "post", "title": "SEOPress hidden", "url": "/sp/",
                 "meta": {"_seopress_robots_index": "yes"}},
                {"id": 5, "type": "post", "title": "AIOSEO hidden", "url": "/aio/",
                 "meta": {"_aioseo_noindex": true}},
                {"id": 6, "type": "post", "title": "Core hidden", "url": "/core/",
                 "meta": {"_wp_robots_noindex": 1}},
                {"id": 7, "type": "post", "title": "Indexable", "url": "/ok/",
                 "meta": {"rank_math_robots": ["nofollow"], "_seopress_robots_index": "no"}}
              ]
            }
        "#})
        .unwrap()
    }

    fn resolver(source: &JsonContentSource) -> SeoResolver<'_> {
        SeoResolver::new(source, RobotsCache::preloaded(Default::default()))
    }

    #[test]
    fn test_each_provider_convention() {
        let source = source_with_meta();
        let seo = resolver(&source);
        assert!(!seo.is_noindexed(1));
        for id in 2..=6 {
            assert!(seo.is_noindexed(id), "item {id} should be noindexed");
        }
        assert!(!seo.is_noindexed(7));
    }

    #[test]
    fn test_discourage_indexing_hides_everything() {
        let source = JsonContentSource::from_json(
            r#"{"site": {"name": "A", "base_url": "https://a.test", "discourage_indexing": true}}"#,
        )
        .unwrap();
        let seo = resolver(&source);
        assert!(seo.is_noindexed(1));
        assert!(seo.is_noindexed(12345));
    }

    #[test]
    fn test_unknown_item_is_indexable() {
        let source = source_with_meta();
        let seo = resolver(&source);
        assert!(!seo.is_noindexed(999));
    }
}
