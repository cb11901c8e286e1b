use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Code every locale mapping falls back to.
pub const FALLBACK_LOCALE: &str = "en";

// ── Locale ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "fr" => Some(Locale::Fr),
            _ => None,
        }
    }

    /// Pick a locale from a browser language tag such as `fr-CA`.
    /// Only the two-letter primary subtag is considered; anything that is not
    /// French lands on English.
    pub fn from_browser_language(tag: &str) -> Self {
        let primary: String = tag.chars().take(2).collect();
        if primary.eq_ignore_ascii_case("fr") {
            Locale::Fr
        } else {
            Locale::En
        }
    }
}

// ── Localized values ──────────────────────────────────

/// A text field that is either locale-invariant or translated per locale code.
/// A `null` translation counts as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Localized(BTreeMap<String, Option<String>>),
}

impl LocalizedText {
    pub fn resolve(&self, locale: &str) -> String {
        match self {
            LocalizedText::Plain(s) => s.clone(),
            LocalizedText::Localized(map) => {
                let lookup = |code: &str| map.get(code).and_then(|v| v.as_deref());
                lookup(locale)
                    .or_else(|| lookup(FALLBACK_LOCALE))
                    .unwrap_or_default()
                    .to_string()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            LocalizedText::Plain(s) => s.is_empty(),
            LocalizedText::Localized(map) => map.values().all(|v| v.is_none()),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        LocalizedText::Plain(s.to_string())
    }
}

/// Label key -> localized text, the `ui` section of the content document.
pub type UiLabels = BTreeMap<String, LocalizedText>;

/// Resolve an optional localized value for `locale`.
/// Absent -> empty; plain -> unchanged; mapping -> locale, then English, then empty.
pub fn resolve(value: Option<&LocalizedText>, locale: &str) -> String {
    value.map(|v| v.resolve(locale)).unwrap_or_default()
}

/// Look up an interface label. A key with no entry comes back verbatim so the
/// missing translation is visible on the page.
pub fn ui_label(key: &str, locale: &str, ui: &UiLabels) -> String {
    match ui.get(key) {
        Some(value) => value.resolve(locale),
        None => key.to_string(),
    }
}

// ── Built-in system labels ────────────────────────────

const BUILTIN_LABELS: &[(&str, &str, &str)] = &[
    ("projectsComing", "Projects coming soon!", "Projets à venir bientôt !"),
    (
        "profileComing",
        "Profile information coming soon!",
        "Informations de profil bientôt disponibles !",
    ),
    (
        "loadError",
        "Unable to load content. Please try again later.",
        "Impossible de charger le contenu. Veuillez réessayer plus tard.",
    ),
    ("closeModal", "Close modal", "Fermer la fenêtre"),
];

/// Labels the page needs before (or without) a content document.
pub fn builtin_labels() -> UiLabels {
    BUILTIN_LABELS
        .iter()
        .map(|(key, en, fr)| {
            let mut map = BTreeMap::new();
            map.insert("en".to_string(), Some(en.to_string()));
            map.insert("fr".to_string(), Some(fr.to_string()));
            (key.to_string(), LocalizedText::Localized(map))
        })
        .collect()
}

/// Built-in labels overlaid with the document's own `ui` entries.
pub fn with_builtin_labels(document_ui: &UiLabels) -> UiLabels {
    let mut merged = builtin_labels();
    for (key, value) in document_ui {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
