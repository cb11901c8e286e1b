//! About section.

use super::{empty_state, external_link, html_escape, RenderContext};
use crate::models::content::Profile;

pub fn render(profile: Option<&Profile>, ctx: &RenderContext) -> String {
    let profile = match profile {
        Some(p) => p,
        None => return empty_state(&ctx.label("profileComing")),
    };

    let name = html_escape(&profile.name);
    let mut html = String::from(r#"<div class="profile">"#);

    if let Some(path) = profile.image.as_deref().filter(|s| !s.is_empty()) {
        html.push_str(&format!(
            r#"<div class="profile-image"><img src="{}" alt="{}"></div>"#,
            ctx.asset(path),
            name
        ));
    }

    html.push_str(&format!(
        r#"<div class="profile-info"><h3 class="profile-name">{}</h3>"#,
        name
    ));

    let headline = ctx.text(profile.headline.as_ref());
    if !headline.is_empty() {
        html.push_str(&format!(
            r#"<p class="profile-headline">{}</p>"#,
            html_escape(&headline)
        ));
    }

    let bio = ctx.text(profile.bio.as_ref());
    if !bio.is_empty() {
        html.push_str(&format!(r#"<p class="profile-bio">{}</p>"#, html_escape(&bio)));
    }

    if !profile.social_links.is_empty() {
        html.push_str(r#"<div class="social-links">"#);
        for link in &profile.social_links {
            html.push_str(&external_link(
                &link.url,
                "social-link",
                &link.platform,
                Some(&link.platform),
            ));
        }
        html.push_str("</div>");
    }

    html.push_str("</div></div>");
    html
}
