//! Manifest rendering: pure functions from selected groups to the two text
//! documents. Identical input always yields byte-identical output.

use crate::export::config::SiteHeader;
use crate::export::sanitize::{body_text, inline_text};
use crate::export::selector::Group;
use crate::export::source::ContentItem;

/// Output knobs the orchestrator sets per rendered file.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Append an `Excerpt:` line to full-manifest entries that have one.
    pub include_excerpt: bool,
    /// Public URL of the full manifest; when set, the link manifest carries
    /// a Full Content Export section pointing at it.
    pub full_export_url: Option<String>,
}

fn render_header(header: &SiteHeader) -> String {
    let mut out = format!("# {}\n\n", header.name);
    let tagline = header.tagline.trim();
    if !tagline.is_empty() {
        out.push_str(&format!("> {tagline}\n\n"));
    }
    if let Some(email) = header.contact_email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        out.push_str(&format!("> Contact: {email}\n\n"));
    }
    out
}

fn display_title(item: &ContentItem) -> String {
    let title = inline_text(&item.title);
    if title.is_empty() { "(No Title)".to_string() } else { title }
}

/// Renders the link-only manifest: header, optional full-export pointer,
/// then one Markdown link line per item under its group heading.
pub fn render_links(groups: &[Group], header: &SiteHeader, options: &RenderOptions) -> String {
    let mut out = render_header(header);

    if let Some(url) = &options.full_export_url {
        out.push_str("## Full Content Export\n");
        out.push_str(&format!("- **URL**: {url}\n\n"));
    }

    for group in groups.iter().filter(|g| !g.items.is_empty()) {
        out.push_str(&format!("### {}\n\n", group.label));
        for item in &group.items {
            out.push_str(&format!("- [{}]({})\n", display_title(item), item.url));
        }
        out.push('\n');
    }

    out
}

/// Renders the full-text manifest: header, then per item its sanitized body,
/// a protected-content placeholder, media detail bullets, or a URL line.
pub fn render_full(groups: &[Group], header: &SiteHeader, options: &RenderOptions) -> String {
    let mut out = render_header(header);

    for group in groups.iter().filter(|g| !g.items.is_empty()) {
        out.push_str(&format!("### {}\n\n", group.label));
        for item in &group.items {
            out.push_str(&format!("#### {}\n", display_title(item)));

            if item.password_protected {
                out.push_str("[Content is password protected]\n\n");
                continue;
            }

            if let Some(file) = &item.file {
                out.push_str(&format!("- URL: {}\n", file.url));
                push_detail(&mut out, "Alt text", file.alt_text.as_deref());
                push_detail(&mut out, "Caption", file.caption.as_deref());
                push_detail(&mut out, "Description", file.description.as_deref());
                out.push('\n');
                continue;
            }

            let body = body_text(&item.body);
            if body.is_empty() {
                out.push_str(&format!("URL: {}\n\n", item.url));
            } else {
                out.push_str(&body);
                out.push_str("\n\n");
            }

            if options.include_excerpt {
                if let Some(excerpt) = item.excerpt.as_deref() {
                    let excerpt = body_text(excerpt);
                    if !excerpt.is_empty() {
                        out.push_str(&format!("Excerpt: {excerpt}\n\n"));
                    }
                }
            }
        }
    }

    out
}

fn push_detail(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        out.push_str(&format!("- {label}: {}\n", inline_text(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::source::{FileMeta, ItemStatus};
    use indoc::indoc;

    fn header() -> SiteHeader {
        SiteHeader {
            name: "Acme".to_string(),
            tagline: String::new(),
            contact_email: None,
        }
    }

    fn item(id: u64, title: &str, url: &str, body: &str) -> ContentItem {
        ContentItem {
            id,
            type_tag: "post".to_string(),
            title: title.to_string(),
            url: url.to_string(),
            body: body.to_string(),
            excerpt: None,
            password_protected: false,
            status: ItemStatus::Published,
            file: None,
        }
    }

    fn posts(items: Vec<ContentItem>) -> Vec<Group> {
        vec![Group {
            tag: "post".to_string(),
            label: "Posts".to_string(),
            items,
        }]
    }

    #[test]
    fn test_links_scenario() {
        let groups = posts(vec![item(1, "Hello", "https://acme.test/hello/", "<p>Hi</p>")]);
        let out = render_links(&groups, &header(), &RenderOptions::default());
        assert_eq!(out, "# Acme\n\n### Posts\n\n- [Hello](https://acme.test/hello/)\n\n");
        assert!(!out.contains("World"));
    }

    #[test]
    fn test_header_block() {
        let header = SiteHeader {
            name: "Acme".to_string(),
            tagline: "Everything under one roof".to_string(),
            contact_email: Some("ai@acme.test".to_string()),
        };
        let out = render_links(&[], &header, &RenderOptions::default());
        assert_eq!(out, "# Acme\n\n> Everything under one roof\n\n> Contact: ai@acme.test\n\n");
    }

    #[test]
    fn test_full_export_pointer() {
        let options = RenderOptions {
            include_excerpt: false,
            full_export_url: Some("https://acme.test/llms-full.txt".to_string()),
        };
        let out = render_links(&[], &header(), &options);
        assert!(out.contains("## Full Content Export\n- **URL**: https://acme.test/llms-full.txt\n\n"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let groups = posts(vec![
            item(1, "Hello", "/hello/", "<p>Hi</p>"),
            item(2, "Other", "/other/", "<p>More</p>"),
        ]);
        let a = render_links(&groups, &header(), &RenderOptions::default());
        let b = render_links(&groups, &header(), &RenderOptions::default());
        assert_eq!(a, b);
        let a = render_full(&groups, &header(), &RenderOptions::default());
        let b = render_full(&groups, &header(), &RenderOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_body_sanitized() {
        let groups = posts(vec![item(
            1,
            "Hello",
            "/hello/",
            "<h2>Intro</h2><p>Hello &amp; welcome.</p><!-- note -->",
        )]);
        let out = render_full(&groups, &header(), &RenderOptions::default());
        assert!(out.contains("#### Hello\n"));
        assert!(out.contains("Hello & welcome."));
        assert!(!out.contains("<p>"));
        assert!(!out.contains("note"));
    }

    #[test]
    fn test_password_protected_placeholder() {
        let mut locked = item(1, "Members Only", "/members/", "<p>secret plans</p>");
        locked.password_protected = true;
        locked.excerpt = Some("a secret teaser".to_string());
        let options = RenderOptions {
            include_excerpt: true,
            full_export_url: None,
        };
        let out = render_full(&posts(vec![locked]), &header(), &options);
        assert!(out.contains("#### Members Only\n[Content is password protected]\n\n"));
        assert!(!out.contains("secret plans"));
        assert!(!out.contains("teaser"));
    }

    #[test]
    fn test_excerpt_line() {
        let mut post = item(1, "Hello", "/hello/", "<p>Body text</p>");
        post.excerpt = Some("<em>Short</em> summary".to_string());

        let without = render_full(&posts(vec![post.clone()]), &header(), &RenderOptions::default());
        assert!(!without.contains("Excerpt:"));

        let options = RenderOptions {
            include_excerpt: true,
            full_export_url: None,
        };
        let with = render_full(&posts(vec![post]), &header(), &options);
        assert!(with.contains("Excerpt: Short summary\n\n"));
    }

    #[test]
    fn test_media_item_detail_bullets() {
        let mut media = item(1, "Logo", "/logo/", "");
        media.file = Some(FileMeta {
            url: "https://acme.test/uploads/logo.png".to_string(),
            alt_text: Some("Acme logo".to_string()),
            caption: None,
            description: Some("Primary brand mark".to_string()),
        });
        let groups = vec![Group {
            tag: "media".to_string(),
            label: "Media".to_string(),
            items: vec![media],
        }];
        let out = render_full(&groups, &header(), &RenderOptions::default());
        let expected = indoc! {"
            ### Media

            #### Logo
            - URL: https://acme.test/uploads/logo.png
            - Alt text: Acme logo
            - Description: Primary brand mark
        "};
        assert!(out.contains(expected));
        assert!(!out.contains("- Caption:"));
    }

    #[test]
    fn test_empty_body_falls_back_to_url() {
        let groups = posts(vec![item(1, "Stub", "/stub/", "")]);
        let out = render_full(&groups, &header(), &RenderOptions::default());
        assert!(out.contains("#### Stub\nURL: /stub/\n\n"));
    }

    #[test]
    fn test_untitled_item_placeholder() {
        let groups = posts(vec![item(1, "  ", "/untitled/", "<p>text</p>")]);
        let out = render_links(&groups, &header(), &RenderOptions::default());
        assert!(out.contains("- [(No Title)](/untitled/)"));
    }

    #[test]
    fn test_empty_groups_render_header_only() {
        let out = render_links(&[], &header(), &RenderOptions::default());
        assert_eq!(out, "# Acme\n\n");
        let out = render_full(&[], &header(), &RenderOptions::default());
        assert_eq!(out, "# Acme\n\n");
    }
}
