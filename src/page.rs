use chrono::Datelike;
use std::collections::BTreeMap;

use crate::i18n::Locale;
use crate::preferences::Theme;

/// Containers whose contents the renderers replace wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Slot {
    Projects,
    Profile,
    Year,
}

/// The page as the app sees it. The browser adapter maps these onto real
/// elements; `MemoryPage` records them for headless use.
///
/// Every operation is a no-op when the element it targets is missing.
pub trait Page {
    fn set_html(&mut self, slot: Slot, html: &str);
    fn set_text(&mut self, slot: Slot, text: &str);
    fn set_root_attribute(&mut self, name: &str, value: &str);

    /// Keys carried by elements flagged for label substitution, in document order.
    fn label_keys(&self) -> Vec<String>;
    fn set_label(&mut self, key: &str, text: &str);

    /// Keep the theme toggle and locale select in step with the active preferences.
    fn reflect_preferences(&mut self, theme: Theme, locale: Locale);

    /// Create the modal element. Called once per session.
    fn mount_modal(&mut self);
    fn set_modal_html(&mut self, html: &str);
    fn set_modal_visible(&mut self, visible: bool);
    fn set_scroll_locked(&mut self, locked: bool);
    fn focus_modal_close(&mut self);
}

/// Signals the platform offers when no preference has been stored yet.
pub trait Environment {
    fn prefers_dark(&self) -> bool;
    fn language(&self) -> Option<String>;

    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

// ── Headless implementations ──────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    pub slots: BTreeMap<Slot, String>,
    pub root_attributes: BTreeMap<String, String>,
    /// Label key -> current text. Only keys registered here are "on the page".
    pub labels: BTreeMap<String, String>,
    pub theme_control: Option<Theme>,
    pub locale_control: Option<Locale>,
    /// `None` until the modal has been mounted.
    pub modal_html: Option<String>,
    pub modal_mounts: usize,
    pub modal_visible: bool,
    pub scroll_locked: bool,
    pub close_focused: bool,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(keys: &[&str]) -> Self {
        let mut page = Self::new();
        for key in keys {
            page.labels.insert(key.to_string(), String::new());
        }
        page
    }

    pub fn slot(&self, slot: Slot) -> &str {
        self.slots.get(&slot).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes.get(name).map(|s| s.as_str())
    }
}

impl Page for MemoryPage {
    fn set_html(&mut self, slot: Slot, html: &str) {
        self.slots.insert(slot, html.to_string());
    }

    fn set_text(&mut self, slot: Slot, text: &str) {
        self.slots.insert(slot, text.to_string());
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.root_attributes
            .insert(name.to_string(), value.to_string());
    }

    fn label_keys(&self) -> Vec<String> {
        self.labels.keys().cloned().collect()
    }

    fn set_label(&mut self, key: &str, text: &str) {
        if let Some(current) = self.labels.get_mut(key) {
            *current = text.to_string();
        }
    }

    fn reflect_preferences(&mut self, theme: Theme, locale: Locale) {
        self.theme_control = Some(theme);
        self.locale_control = Some(locale);
    }

    fn mount_modal(&mut self) {
        self.modal_html = Some(String::new());
        self.modal_mounts += 1;
    }

    fn set_modal_html(&mut self, html: &str) {
        if let Some(current) = self.modal_html.as_mut() {
            *current = html.to_string();
        }
    }

    fn set_modal_visible(&mut self, visible: bool) {
        self.modal_visible = visible && self.modal_html.is_some();
        if !visible {
            self.close_focused = false;
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn focus_modal_close(&mut self) {
        self.close_focused = self.modal_html.is_some();
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment {
    pub prefers_dark: bool,
    pub language: Option<String>,
    pub year: Option<i32>,
}

impl Environment for FixedEnvironment {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn language(&self) -> Option<String> {
        self.language.clone()
    }

    fn current_year(&self) -> i32 {
        self.year.unwrap_or_else(|| chrono::Local::now().year())
    }
}
