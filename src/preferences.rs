use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::config::Config;
use crate::i18n::Locale;
use crate::page::{Environment, Page};

/// Root attribute the stylesheet keys its color scheme on.
pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const LANG_ATTRIBUTE: &str = "lang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

// ── Storage seam ──────────────────────────────────────

/// Durable key-value storage scoped to the site (browser local storage in
/// production).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// In-process store for headless hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (k, v) in entries {
            store
                .entries
                .borrow_mut()
                .insert(k.to_string(), v.to_string());
        }
        store
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// ── Preferences ───────────────────────────────────────

/// Theme and locale, persisted independently under the configured keys.
pub struct Preferences<S: KeyValueStore> {
    store: S,
    theme_key: String,
    locale_key: String,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Preferences {
            store,
            theme_key: config.theme_key.clone(),
            locale_key: config.locale_key.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored theme, else the platform's color-scheme preference.
    pub fn theme(&self, env: &dyn Environment) -> Theme {
        match self.store.get(&self.theme_key).as_deref().and_then(Theme::parse) {
            Some(theme) => theme,
            None if env.prefers_dark() => Theme::Dark,
            None => Theme::Light,
        }
    }

    /// Stored locale, else the browser language (French or English).
    pub fn locale(&self, env: &dyn Environment) -> Locale {
        match self
            .store
            .get(&self.locale_key)
            .as_deref()
            .and_then(Locale::from_code)
        {
            Some(locale) => locale,
            None => env
                .language()
                .map(|tag| Locale::from_browser_language(&tag))
                .unwrap_or_default(),
        }
    }

    pub fn set_theme(&self, theme: Theme, page: &mut dyn Page) {
        persist(&self.store, &self.theme_key, theme.as_str());
        apply_theme(theme, page);
    }

    pub fn set_locale(&self, locale: Locale, page: &mut dyn Page) {
        persist(&self.store, &self.locale_key, locale.code());
        apply_locale(locale, page);
    }
}

pub fn apply_theme(theme: Theme, page: &mut dyn Page) {
    page.set_root_attribute(THEME_ATTRIBUTE, theme.as_str());
}

pub fn apply_locale(locale: Locale, page: &mut dyn Page) {
    page.set_root_attribute(LANG_ATTRIBUTE, locale.code());
}

fn persist(store: &dyn KeyValueStore, key: &str, value: &str) {
    match store.set(key, value) {
        Ok(()) => debug!("Stored preference {}={}", key, value),
        // Private browsing and full quotas refuse writes; the page still switches.
        Err(e) => warn!("Could not store preference {}: {}", key, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{FixedEnvironment, MemoryPage};

    fn prefs(entries: &[(&str, &str)]) -> Preferences<MemoryStore> {
        Preferences::new(MemoryStore::with_entries(entries), &Config::default())
    }

    fn env(dark: bool, lang: Option<&str>) -> FixedEnvironment {
        FixedEnvironment {
            prefers_dark: dark,
            language: lang.map(|s| s.to_string()),
            year: None,
        }
    }

    #[test]
    fn test_theme_defaults_to_platform_signal() {
        let p = prefs(&[]);
        assert_eq!(p.theme(&env(true, None)), Theme::Dark);
        assert_eq!(p.theme(&env(false, None)), Theme::Light);
    }

    #[test]
    fn test_stored_theme_wins() {
        let p = prefs(&[("theme", "light")]);
        assert_eq!(p.theme(&env(true, None)), Theme::Light);
    }

    #[test]
    fn test_garbage_stored_theme_ignored() {
        let p = prefs(&[("theme", "sepia")]);
        assert_eq!(p.theme(&env(true, None)), Theme::Dark);
    }

    #[test]
    fn test_locale_defaults() {
        let p = prefs(&[]);
        assert_eq!(p.locale(&env(false, Some("fr-FR"))), Locale::Fr);
        assert_eq!(p.locale(&env(false, Some("es"))), Locale::En);
        assert_eq!(p.locale(&env(false, None)), Locale::En);
    }

    #[test]
    fn test_stored_locale_wins() {
        let p = prefs(&[("lang", "fr")]);
        assert_eq!(p.locale(&env(false, Some("en-US"))), Locale::Fr);
    }

    #[test]
    fn test_set_theme_persists_and_applies() {
        let p = prefs(&[]);
        let mut page = MemoryPage::new();
        p.set_theme(Theme::Dark, &mut page);
        assert_eq!(p.store().get("theme").as_deref(), Some("dark"));
        assert_eq!(page.root_attribute(THEME_ATTRIBUTE), Some("dark"));
        assert_eq!(p.theme(&env(false, None)), Theme::Dark);
    }

    #[test]
    fn test_set_is_idempotent() {
        let p = prefs(&[]);
        let mut page = MemoryPage::new();
        p.set_locale(Locale::Fr, &mut page);
        let once = (p.store().get("lang"), page.root_attributes.clone());
        p.set_locale(Locale::Fr, &mut page);
        let twice = (p.store().get("lang"), page.root_attributes.clone());
        assert_eq!(once, twice);
        assert_eq!(page.root_attribute(LANG_ATTRIBUTE), Some("fr"));
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
