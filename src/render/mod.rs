//! Markup generation. Every renderer is a pure function from content to an
//! HTML string; callers decide where the string goes.

pub mod modal;
pub mod profile;
pub mod projects;

use crate::i18n::{self, LocalizedText, UiLabels};

/// What a renderer needs besides the data itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub locale: &'a str,
    pub ui: &'a UiLabels,
    pub assets_dir: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn label(&self, key: &str) -> String {
        i18n::ui_label(key, self.locale, self.ui)
    }

    pub fn text(&self, value: Option<&LocalizedText>) -> String {
        i18n::resolve(value, self.locale)
    }

    pub fn asset(&self, path: &str) -> String {
        let dir = self.assets_dir.trim_end_matches('/');
        let file = path.trim_start_matches('/');
        if dir.is_empty() {
            html_escape(file)
        } else {
            format!("{}/{}", html_escape(dir), html_escape(file))
        }
    }
}

/// Escape text for use in element content or a double- or single-quoted attribute.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn empty_state(message: &str) -> String {
    format!(
        r#"<div class="empty-state"><p>{}</p></div>"#,
        html_escape(message)
    )
}

pub(crate) fn error_state(message: &str) -> String {
    format!(
        r#"<div class="error-state"><p>{}</p></div>"#,
        html_escape(message)
    )
}

/// Link that opens in a new browsing context without opener or referrer.
pub(crate) fn external_link(url: &str, class: &str, label: &str, aria_label: Option<&str>) -> String {
    let aria = aria_label
        .map(|a| format!(r#" aria-label="{}""#, html_escape(a)))
        .unwrap_or_default();
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="{}"{}>{}</a>"#,
        html_escape(url),
        class,
        aria,
        html_escape(label)
    )
}

pub(crate) fn tag_list(tags: &[String], extra_class: &str) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let mut html = if extra_class.is_empty() {
        r#"<div class="project-tags">"#.to_string()
    } else {
        format!(r#"<div class="project-tags {}">"#, extra_class)
    };
    for tag in tags {
        html.push_str(&format!(r#"<span class="tag">{}</span>"#, html_escape(tag)));
    }
    html.push_str("</div>");
    html
}

/// Source ("GitHub") and demo ("Visit") links; either may be absent.
pub(crate) fn project_links(source_url: Option<&str>, demo_url: Option<&str>) -> String {
    let mut html = String::new();
    if let Some(url) = source_url.filter(|u| !u.is_empty()) {
        html.push_str(&external_link(url, "project-link", "GitHub", None));
    }
    if let Some(url) = demo_url.filter(|u| !u.is_empty()) {
        html.push_str(&external_link(
            url,
            "project-link project-link--primary",
            "Visit",
            None,
        ));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(
            html_escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_leaves_plain_text() {
        assert_eq!(html_escape("Café — 100%"), "Café — 100%");
        assert_eq!(html_escape(""), "");
    }

    #[test]
    fn test_escape_is_not_idempotent_on_entities() {
        assert_eq!(html_escape("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_external_link_safety() {
        let html = external_link("https://x.dev/?a=1&b=\"2\"", "social-link", "X", Some("X"));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains("a=1&amp;b=&quot;2&quot;"));
        assert!(html.contains(r#"aria-label="X""#));
    }

    #[test]
    fn test_project_links_skip_empty() {
        assert_eq!(project_links(None, Some("")), "");
        let both = project_links(Some("https://src"), Some("https://demo"));
        assert!(both.find("GitHub").unwrap() < both.find("Visit").unwrap());
    }

    #[test]
    fn test_asset_path_escaped() {
        let ui = UiLabels::new();
        let ctx = RenderContext { locale: "en", ui: &ui, assets_dir: "assets/" };
        assert_eq!(ctx.asset("/a\"b.png"), "assets/a&quot;b.png");
    }
}
