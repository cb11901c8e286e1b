//! Body of the project details overlay.

use super::{html_escape, project_links, tag_list, RenderContext};
use crate::models::content::Project;

/// Attribute marking elements whose click dismisses the overlay.
pub const DISMISS_ATTRIBUTE: &str = "data-modal-dismiss";

pub fn render(project: &Project, ctx: &RenderContext) -> String {
    format!(
        r#"<div class="modal-backdrop" {dismiss}></div><div class="modal-content" role="document"><button type="button" class="modal-close" {dismiss} aria-label="{close}">&times;</button><h2 class="modal-title">{name}</h2><p class="modal-description">{description}</p>{tags}<div class="modal-links">{links}</div></div>"#,
        dismiss = DISMISS_ATTRIBUTE,
        close = html_escape(&ctx.label("closeModal")),
        name = html_escape(&project.name),
        description = html_escape(&ctx.text(project.detail_text())),
        tags = tag_list(&project.tags, "modal-tags"),
        links = project_links(project.source_url.as_deref(), project.demo_url.as_deref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::UiLabels;

    #[test]
    fn test_modal_body() {
        let project = Project {
            id: "p".into(),
            name: "A & B".into(),
            description: Some("short".into()),
            full_description: Some("the long story".into()),
            tags: vec!["wasm".into()],
            demo_url: Some("https://ab.dev".into()),
            ..Default::default()
        };
        let ui = UiLabels::new();
        let ctx = RenderContext { locale: "en", ui: &ui, assets_dir: "assets" };
        let html = render(&project, &ctx);
        assert!(html.contains(r#"<h2 class="modal-title">A &amp; B</h2>"#));
        assert!(html.contains("the long story"));
        assert!(!html.contains("short"));
        assert!(html.contains(r#"class="project-tags modal-tags""#));
        assert!(html.contains(">Visit</a>"));
        assert!(!html.contains(">GitHub</a>"));
        assert!(!html.contains("onclick"));
        assert_eq!(html.matches(DISMISS_ATTRIBUTE).count(), 2);
    }
}
