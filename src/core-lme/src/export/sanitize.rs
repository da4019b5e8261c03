//! Plain-text sanitization for manifest output.
//!
//! Bodies arrive as stored HTML with templating shortcodes embedded. The
//! pipeline: unwrap shortcodes to their enclosed text, strip tags and
//! comments (decoding entities in the process), collapse runs of blank
//! lines, trim.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

static SHORTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[/?[a-zA-Z][a-zA-Z0-9_-]*(?:\s+[^\]]*)?\]").expect("shortcode pattern"));

static SCRIPT_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(?:script|style)[^>]*>.*?</(?:script|style)\s*>").expect("script/style pattern"));

static EXTRA_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-line pattern"));

/// Expands shortcode-style placeholders to their rendered text: paired tags
/// unwrap to the enclosed text, bare tags disappear. Bracketed text that is
/// not tag-shaped (e.g. `[1]`) is left alone.
///
/// # Examples
///
/// ```
/// # use core_lme::export::sanitize::expand_shortcodes;
/// assert_eq!(expand_shortcodes("[caption]A photo[/caption]"), "A photo");
/// assert_eq!(expand_shortcodes("before [gallery ids=\"1,2\"] after"), "before  after");
/// assert_eq!(expand_shortcodes("see [1] for details"), "see [1] for details");
/// ```
pub fn expand_shortcodes(text: &str) -> String {
    SHORTCODE.replace_all(text, "").into_owned()
}

/// Strips HTML tags and comments, returning the decoded text content.
/// Script and style elements are removed wholesale, content included.
pub fn strip_tags(html: &str) -> String {
    let html = SCRIPT_STYLE.replace_all(html, "");
    let fragment = Html::parse_fragment(&html);
    fragment.root_element().text().collect()
}

/// Collapses runs of three or more newlines down to one blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    EXTRA_BLANK_LINES.replace_all(text, "\n\n").into_owned()
}

/// Full body pipeline: shortcodes expanded, tags stripped, blank runs
/// collapsed, trimmed.
pub fn body_text(raw: &str) -> String {
    let text = strip_tags(&expand_shortcodes(&raw.replace("\r\n", "\n")));
    collapse_blank_lines(&text).trim().to_string()
}

/// One-line variant for titles and labels: tags stripped, entities decoded,
/// all whitespace runs collapsed to single spaces.
pub fn inline_text(raw: &str) -> String {
    strip_tags(raw).split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_expand_shortcodes() {
        assert_eq!(expand_shortcodes("[caption]A photo[/caption]"), "A photo");
        assert_eq!(expand_shortcodes("x [gallery ids=\"1\"] y"), "x  y");
        assert_eq!(expand_shortcodes("[contact-form-7 id=\"12\" title=\"form\"]"), "");
        assert_eq!(expand_shortcodes("see [1] and [2026]"), "see [1] and [2026]");
        assert_eq!(expand_shortcodes("no shortcodes here"), "no shortcodes here");
    }

    #[test]
    fn test_strip_tags_decodes_entities() {
        assert_eq!(strip_tags("<p>AT&amp;T &gt; the rest</p>"), "AT&T > the rest");
        assert_eq!(strip_tags("plain text"), "plain text");
    }

    #[test]
    fn test_strip_tags_drops_comments_and_scripts() {
        assert_eq!(strip_tags("a<!-- hidden note -->b"), "ab");
        assert_eq!(strip_tags("before<script>var x = 1;</script>after"), "beforeafter");
        assert_eq!(strip_tags("<style>p { color: red }</style>text"), "text");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_body_text_pipeline() {
        let raw = indoc! {r#"
            <h2>Intro</h2>
            <p>Hello &amp; welcome.</p>
            <!-- editor note -->



            [embed]https://example.com/video[/embed]
        "#};
        let text = body_text(raw);
        assert!(text.starts_with("Intro"));
        assert!(text.contains("Hello & welcome."));
        assert!(text.contains("https://example.com/video"));
        assert!(!text.contains("editor note"));
        assert!(!text.contains("[embed]"));
        assert!(!text.contains("\n\n\n"));
    }

    #[test]
    fn test_body_text_empty_input() {
        assert_eq!(body_text(""), "");
        assert_eq!(body_text("<p>  </p>"), "");
    }

    #[test]
    fn test_inline_text() {
        assert_eq!(inline_text("<em>Hello</em>\n  World"), "Hello World");
        assert_eq!(inline_text("Ben &amp; Jerry"), "Ben & Jerry");
    }
}
