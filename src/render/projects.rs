//! Project card grid.

use super::{empty_state, html_escape, project_links, tag_list, RenderContext};
use crate::models::content::Project;

pub struct RenderedProjects {
    pub html: String,
    /// The cards' order on screen; the modal looks projects up here.
    pub sorted: Vec<Project>,
}

/// Copy of `projects` in ascending `order`; equal orders keep their input order.
pub fn sorted_by_order(projects: &[Project]) -> Vec<Project> {
    let mut sorted = projects.to_vec();
    // `sort_by` is stable.
    sorted.sort_by(|a, b| a.order.total_cmp(&b.order));
    sorted
}

pub fn render(projects: &[Project], ctx: &RenderContext) -> RenderedProjects {
    if projects.is_empty() {
        return RenderedProjects {
            html: empty_state(&ctx.label("projectsComing")),
            sorted: Vec::new(),
        };
    }

    let sorted = sorted_by_order(projects);
    let html = sorted.iter().map(|p| render_card(p, ctx)).collect();
    RenderedProjects { html, sorted }
}

fn render_card(project: &Project, ctx: &RenderContext) -> String {
    let name = html_escape(&project.name);

    let image = match project.image.as_deref().filter(|s| !s.is_empty()) {
        Some(path) => format!(
            r#"<div class="project-image"><img src="{}" alt="{}" loading="lazy"></div>"#,
            ctx.asset(path),
            name
        ),
        None => String::new(),
    };

    format!(
        r#"<article class="project-card" data-project-id="{id}">{image}<div class="project-content"><h3 class="project-title">{name}</h3><p class="project-description">{description}</p>{tags}<div class="project-links">{links}</div></div></article>"#,
        id = html_escape(&project.id),
        image = image,
        name = name,
        description = html_escape(&ctx.text(project.description.as_ref())),
        tags = tag_list(&project.tags, ""),
        links = project_links(project.source_url.as_deref(), project.demo_url.as_deref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{LocalizedText, UiLabels};

    fn project(id: &str, order: i64) -> Project {
        Project {
            id: id.into(),
            name: format!("Project {}", id),
            order: order as f64,
            ..Default::default()
        }
    }

    fn ctx<'a>(locale: &'a str, ui: &'a UiLabels) -> RenderContext<'a> {
        RenderContext { locale, ui, assets_dir: "assets" }
    }

    #[test]
    fn test_sort_is_stable_ascending() {
        let input = vec![
            project("c", 2),
            project("a", 1),
            project("d", 2),
            project("b", 1),
            project("e", -5),
        ];
        let ids: Vec<String> = sorted_by_order(&input).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["e", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_fractional_order_sorts_between_integers() {
        let mut mid = project("mid", 0);
        mid.order = 1.5;
        let input = vec![project("two", 2), mid, project("one", 1)];
        let ids: Vec<String> = sorted_by_order(&input).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["one", "mid", "two"]);
    }

    #[test]
    fn test_null_tag_renders_one_tag() {
        let body = r#"{"projects": [{"id": "p", "tags": ["x", null]}]}"#;
        let content = crate::models::content::Content::from_json(body).unwrap();
        let html = render(&content.projects, &ctx("en", &UiLabels::new())).html;
        assert_eq!(html.matches(r#"<span class="tag">"#).count(), 1);
    }

    #[test]
    fn test_sort_leaves_input_untouched() {
        let input = vec![project("b", 2), project("a", 1)];
        let before = input.clone();
        let _ = render(&input, &ctx("en", &UiLabels::new()));
        assert_eq!(input, before);
    }

    #[test]
    fn test_empty_state() {
        let mut ui = UiLabels::new();
        ui.insert("projectsComing".into(), LocalizedText::from("Soon"));
        let out = render(&[], &ctx("en", &ui));
        assert_eq!(out.html, r#"<div class="empty-state"><p>Soon</p></div>"#);
        assert!(!out.html.contains("project-card"));
        assert!(out.sorted.is_empty());
    }

    #[test]
    fn test_cards_in_sorted_order() {
        let out = render(&[project("b", 2), project("a", 1)], &ctx("en", &UiLabels::new()));
        let a = out.html.find(r#"data-project-id="a""#).unwrap();
        let b = out.html.find(r#"data-project-id="b""#).unwrap();
        assert!(a < b);
        assert_eq!(out.sorted[0].id, "a");
    }

    #[test]
    fn test_card_fields_escaped() {
        let p = Project {
            id: "x\"y".into(),
            name: "<b>Bold</b>".into(),
            description: Some("a & b".into()),
            tags: vec!["<t>".into()],
            image: Some("shot.png".into()),
            ..Default::default()
        };
        let html = render(&[p], &ctx("en", &UiLabels::new())).html;
        assert!(html.contains(r#"data-project-id="x&quot;y""#));
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains(r#"<span class="tag">&lt;t&gt;</span>"#));
        assert!(html.contains(r#"src="assets/shot.png""#));
        assert!(html.contains(r#"loading="lazy""#));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_card_optional_parts_omitted() {
        let html = render(&[project("p", 0)], &ctx("en", &UiLabels::new())).html;
        assert!(!html.contains("<img"));
        assert!(!html.contains("project-tags"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_card_description_localized() {
        let mut p = project("p", 0);
        p.description =
            Some(serde_json::from_str(r#"{"en":"Hello","fr":"Bonjour"}"#).unwrap());
        let ui = UiLabels::new();
        assert!(render(&[p.clone()], &ctx("fr", &ui)).html.contains("Bonjour"));
        assert!(render(&[p], &ctx("de", &ui)).html.contains("Hello"));
    }

    #[test]
    fn test_card_links() {
        let mut p = project("p", 0);
        p.source_url = Some("https://github.com/me/p".into());
        p.demo_url = Some("https://p.dev".into());
        let html = render(&[p], &ctx("en", &UiLabels::new())).html;
        assert_eq!(html.matches(r#"rel="noopener noreferrer""#).count(), 2);
        assert!(html.contains(">GitHub</a>"));
        assert!(html.contains(">Visit</a>"));
    }
}
