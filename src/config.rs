use serde::Deserialize;

/// Page wiring: where content lives, which elements the renderers own, and the
/// storage keys for persisted preferences. Every field has a default, so a
/// partial JSON override is enough.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub content_url: String,
    pub assets_dir: String,
    pub projects_container: String,
    pub profile_container: String,
    pub year_element: String,
    pub theme_toggle: String,
    pub locale_select: String,
    pub modal_id: String,
    pub label_attribute: String,
    pub theme_key: String,
    pub locale_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content_url: "data/content.json".to_string(),
            assets_dir: "assets".to_string(),
            projects_container: "projects-container".to_string(),
            profile_container: "about-container".to_string(),
            year_element: "current-year".to_string(),
            theme_toggle: "theme-toggle".to_string(),
            locale_select: "lang-select".to_string(),
            modal_id: "project-modal".to_string(),
            label_attribute: "data-i18n".to_string(),
            theme_key: "theme".to_string(),
            locale_key: "lang".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("Invalid config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let cfg = Config::from_json(r#"{"content_url": "/api/content.json"}"#).unwrap();
        assert_eq!(cfg.content_url, "/api/content.json");
        assert_eq!(cfg.assets_dir, "assets");
        assert_eq!(cfg.locale_key, "lang");
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_json("{").is_err());
    }
}
