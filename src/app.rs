use log::{info, warn};

use crate::config::Config;
use crate::i18n::{self, Locale, UiLabels};
use crate::loader::{ContentLoader, ContentSource, LoadError};
use crate::modal::ModalController;
use crate::models::content::{Content, Project};
use crate::page::{Environment, Page, Slot};
use crate::preferences::{self, KeyValueStore, Preferences, Theme};
use crate::render::{self, RenderContext};

/// A click as seen by the delegated handlers, already classified by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    /// Inside a project card, not on a link.
    Card(String),
    /// On a link (inside a card or not); links never open the overlay.
    Link,
    /// On the overlay backdrop or its close control.
    Dismiss,
    Elsewhere,
}

impl Click {
    /// Classify a click inside the projects container. A link wins over the
    /// card it sits in.
    pub fn in_projects(inside_link: bool, card_id: Option<String>) -> Self {
        if inside_link {
            return Click::Link;
        }
        match card_id {
            Some(id) => Click::Card(id),
            None => Click::Elsewhere,
        }
    }
}

pub const ESCAPE_KEY: &str = "Escape";

/// Everything the page holds in memory for one visit.
#[derive(Debug, Default)]
pub struct AppState {
    pub locale: Locale,
    pub theme: Theme,
    /// `None` until the document loads; never modified afterwards.
    pub content: Option<Content>,
    /// Built-in labels overlaid with the document's `ui`.
    pub ui: UiLabels,
    /// Projects in on-screen order. Modal lookups go through this list.
    pub projects: Vec<Project>,
    pub load_error: Option<LoadError>,
}

pub struct App<P: Page, S: KeyValueStore, E: Environment> {
    config: Config,
    page: P,
    prefs: Preferences<S>,
    env: E,
    state: AppState,
    modal: ModalController,
}

impl<P: Page, S: KeyValueStore, E: Environment> App<P, S, E> {
    pub fn new(config: Config, page: P, store: S, env: E) -> Self {
        let prefs = Preferences::new(store, &config);
        App {
            config,
            page,
            prefs,
            env,
            state: AppState {
                ui: i18n::builtin_labels(),
                ..Default::default()
            },
            modal: ModalController::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.prefs
    }

    /// Footer year plus stored (or platform default) theme and locale.
    /// Defaults are applied, not stored.
    pub fn init(&mut self) {
        let year = self.env.current_year();
        self.page.set_text(Slot::Year, &year.to_string());

        self.state.theme = self.prefs.theme(&self.env);
        self.state.locale = self.prefs.locale(&self.env);
        preferences::apply_theme(self.state.theme, &mut self.page);
        preferences::apply_locale(self.state.locale, &mut self.page);
        self.page
            .reflect_preferences(self.state.theme, self.state.locale);

        info!(
            "Portfolio starting (theme={}, locale={})",
            self.state.theme.as_str(),
            self.state.locale.code()
        );
    }

    pub async fn load<C: ContentSource>(&mut self, loader: &ContentLoader<C>) -> bool {
        let result = loader.load().await;
        self.apply_load(result)
    }

    /// Take the outcome of the single content load. On failure only the
    /// projects area changes.
    pub fn apply_load(&mut self, result: Result<Content, LoadError>) -> bool {
        match result {
            Ok(content) => {
                self.state.ui = i18n::with_builtin_labels(&content.ui);
                self.state.content = Some(content);
                self.state.load_error = None;
                self.render();
                true
            }
            Err(e) => {
                self.state.load_error = Some(e);
                self.render_load_error();
                false
            }
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.prefs.set_theme(theme, &mut self.page);
        self.state.theme = theme;
        self.page.reflect_preferences(theme, self.state.locale);
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.state.theme.toggled());
    }

    /// Switch language and re-render from the content already in memory.
    pub fn set_locale(&mut self, locale: Locale) {
        self.prefs.set_locale(locale, &mut self.page);
        self.state.locale = locale;
        self.page.reflect_preferences(self.state.theme, locale);
        if self.state.content.is_some() {
            self.render();
        } else if self.state.load_error.is_some() {
            self.render_load_error();
        }
    }

    /// Value straight from the locale select. Unsupported codes are ignored.
    pub fn set_locale_code(&mut self, code: &str) -> bool {
        match Locale::from_code(code) {
            Some(locale) => {
                self.set_locale(locale);
                true
            }
            None => {
                warn!("Ignoring unsupported locale {:?}", code);
                false
            }
        }
    }

    pub fn handle_click(&mut self, click: Click) {
        match click {
            Click::Card(id) => {
                self.open_project(&id);
            }
            Click::Dismiss => self.close_modal(),
            Click::Link | Click::Elsewhere => {}
        }
    }

    pub fn handle_key(&mut self, key: &str) {
        if key == ESCAPE_KEY {
            self.close_modal();
        }
    }

    pub fn open_project(&mut self, id: &str) -> bool {
        let ctx = RenderContext {
            locale: self.state.locale.code(),
            ui: &self.state.ui,
            assets_dir: &self.config.assets_dir,
        };
        self.modal
            .open(id, &self.state.projects, &ctx, &mut self.page)
    }

    pub fn close_modal(&mut self) {
        self.modal.close(&mut self.page);
    }

    fn render(&mut self) {
        let content = match &self.state.content {
            Some(c) => c,
            None => return,
        };
        let locale = self.state.locale.code();
        let ctx = RenderContext {
            locale,
            ui: &self.state.ui,
            assets_dir: &self.config.assets_dir,
        };

        for key in self.page.label_keys() {
            let text = i18n::ui_label(&key, locale, ctx.ui);
            self.page.set_label(&key, &text);
        }

        let rendered = render::projects::render(&content.projects, &ctx);
        self.page.set_html(Slot::Projects, &rendered.html);
        self.page.set_html(
            Slot::Profile,
            &render::profile::render(content.profile.as_ref(), &ctx),
        );
        self.state.projects = rendered.sorted;

        self.modal
            .refresh(&self.state.projects, &ctx, &mut self.page);
    }

    fn render_load_error(&mut self) {
        let message = i18n::ui_label("loadError", self.state.locale.code(), &self.state.ui);
        self.page
            .set_html(Slot::Projects, &render::error_state(&message));
    }
}
