//! Browser adapter: real DOM, local storage, and the wasm entry point.

use log::{error, warn, Level, LevelFilter, Metadata, Record};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, Event, HtmlElement, HtmlSelectElement, KeyboardEvent, Storage, Window};

use crate::app::{App, Click};
use crate::config::Config;
use crate::i18n::Locale;
use crate::loader::{ContentLoader, HttpSource};
use crate::page::{Environment, Page, Slot};
use crate::preferences::{KeyValueStore, Theme};
use crate::render::modal::DISMISS_ATTRIBUTE;

/// Optional JSON `Config` override on the root element.
const CONFIG_ATTRIBUTE: &str = "data-folio-config";

type BrowserApp = App<DomPage, LocalStorage, BrowserEnvironment>;

// ── Page ──────────────────────────────────────────────

pub struct DomPage {
    document: Document,
    config: Config,
    modal: Option<Element>,
}

impl DomPage {
    pub fn new(document: Document, config: Config) -> Self {
        DomPage {
            document,
            config,
            modal: None,
        }
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn slot_element(&self, slot: Slot) -> Option<Element> {
        let id = match slot {
            Slot::Projects => &self.config.projects_container,
            Slot::Profile => &self.config.profile_container,
            Slot::Year => &self.config.year_element,
        };
        self.by_id(id)
    }

    fn label_elements(&self) -> Vec<Element> {
        let selector = format!("[{}]", self.config.label_attribute);
        let nodes = match self.document.query_selector_all(&selector) {
            Ok(nodes) => nodes,
            Err(_) => return Vec::new(),
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl Page for DomPage {
    fn set_html(&mut self, slot: Slot, html: &str) {
        if let Some(el) = self.slot_element(slot) {
            el.set_inner_html(html);
        }
    }

    fn set_text(&mut self, slot: Slot, text: &str) {
        if let Some(el) = self.slot_element(slot) {
            el.set_text_content(Some(text));
        }
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute(name, value);
        }
    }

    fn label_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for el in self.label_elements() {
            if let Some(key) = el.get_attribute(&self.config.label_attribute) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    fn set_label(&mut self, key: &str, text: &str) {
        for el in self.label_elements() {
            if el.get_attribute(&self.config.label_attribute).as_deref() == Some(key) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn reflect_preferences(&mut self, theme: Theme, locale: Locale) {
        if let Some(select) = self
            .by_id(&self.config.locale_select)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(locale.code());
        }
        if let Some(toggle) = self.by_id(&self.config.theme_toggle) {
            let pressed = if theme == Theme::Dark { "true" } else { "false" };
            let _ = toggle.set_attribute("aria-pressed", pressed);
        }
    }

    fn mount_modal(&mut self) {
        let modal = match self.document.create_element("div") {
            Ok(el) => el,
            Err(_) => {
                error!("Could not create modal element");
                return;
            }
        };
        modal.set_id(&self.config.modal_id);
        modal.set_class_name("modal");
        let _ = modal.set_attribute("role", "dialog");
        let _ = modal.set_attribute("aria-modal", "true");
        if let Some(body) = self.document.body() {
            let _ = body.append_child(&modal);
        }
        self.modal = Some(modal);
    }

    fn set_modal_html(&mut self, html: &str) {
        if let Some(modal) = &self.modal {
            modal.set_inner_html(html);
        }
    }

    fn set_modal_visible(&mut self, visible: bool) {
        if let Some(modal) = &self.modal {
            let _ = modal.class_list().toggle_with_force("modal--open", visible);
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        if let Some(body) = self.document.body() {
            let style = body.style();
            let _ = if locked {
                style.set_property("overflow", "hidden")
            } else {
                style.remove_property("overflow").map(|_| ())
            };
        }
    }

    fn focus_modal_close(&mut self) {
        let close = self
            .modal
            .as_ref()
            .and_then(|m| m.query_selector(".modal-close").ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(button) = close {
            let _ = button.focus();
        }
    }
}

// ── Storage and platform signals ──────────────────────

pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new(window: &Window) -> Self {
        // Some privacy modes throw on access; fall back to no persistence.
        LocalStorage {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| "local storage unavailable".to_string())?;
        storage
            .set_item(key, value)
            .map_err(|e| format!("{:?}", e))
    }
}

pub struct BrowserEnvironment {
    window: Window,
}

impl BrowserEnvironment {
    pub fn new(window: Window) -> Self {
        BrowserEnvironment { window }
    }
}

impl Environment for BrowserEnvironment {
    fn prefers_dark(&self) -> bool {
        self.window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map(|m| m.matches())
            .unwrap_or(false)
    }

    fn language(&self) -> Option<String> {
        self.window.navigator().language()
    }
}

// ── Logging ───────────────────────────────────────────

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

// ── Entry point ───────────────────────────────────────

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = read_config(&document);

    let app: Rc<RefCell<BrowserApp>> = Rc::new(RefCell::new(App::new(
        config.clone(),
        DomPage::new(document.clone(), config.clone()),
        LocalStorage::new(&window),
        BrowserEnvironment::new(window.clone()),
    )));
    app.borrow_mut().init();

    bind_theme_toggle(&document, &config, &app)?;
    bind_locale_select(&document, &config, &app)?;
    bind_keyboard(&document, &app)?;
    bind_modal_dismiss(&document, &app)?;

    let page_url = window.location().href()?;
    let source = match HttpSource::resolve(&page_url, &config.content_url) {
        Ok(source) => source,
        Err(e) => {
            app.borrow_mut().apply_load(Err(e));
            return Ok(());
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        let loader = ContentLoader::new(source);
        let result = loader.load().await;
        let loaded = app.borrow_mut().apply_load(result);
        if loaded {
            if let Err(e) = bind_project_clicks(&document, &config, &app) {
                error!("Could not bind project clicks: {:?}", e);
            }
        }
    });

    Ok(())
}

fn read_config(document: &Document) -> Config {
    let raw = document
        .document_element()
        .and_then(|root| root.get_attribute(CONFIG_ATTRIBUTE));
    match raw {
        Some(raw) => Config::from_json(&raw).unwrap_or_else(|e| {
            warn!("{}; using defaults", e);
            Config::default()
        }),
        None => Config::default(),
    }
}

fn listen<F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    cb.forget();
    Ok(())
}

fn bind_theme_toggle(
    document: &Document,
    config: &Config,
    app: &Rc<RefCell<BrowserApp>>,
) -> Result<(), JsValue> {
    let toggle = match document.get_element_by_id(&config.theme_toggle) {
        Some(el) => el,
        None => return Ok(()),
    };
    let app = Rc::clone(app);
    listen(&toggle, "click", move |_| app.borrow_mut().toggle_theme())
}

fn bind_locale_select(
    document: &Document,
    config: &Config,
    app: &Rc<RefCell<BrowserApp>>,
) -> Result<(), JsValue> {
    let select = match document
        .get_element_by_id(&config.locale_select)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    {
        Some(el) => el,
        None => return Ok(()),
    };
    let app = Rc::clone(app);
    let source = select.clone();
    listen(&select, "change", move |_| {
        app.borrow_mut().set_locale_code(&source.value());
    })
}

fn bind_keyboard(document: &Document, app: &Rc<RefCell<BrowserApp>>) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    listen(document, "keydown", move |event| {
        if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
            app.borrow_mut().handle_key(&key_event.key());
        }
    })
}

fn bind_modal_dismiss(document: &Document, app: &Rc<RefCell<BrowserApp>>) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let selector = format!("[{}]", DISMISS_ATTRIBUTE);
    listen(document, "click", move |event| {
        if let Some(target) = event_element(&event) {
            if matches!(target.closest(&selector), Ok(Some(_))) {
                app.borrow_mut().handle_click(Click::Dismiss);
            }
        }
    })
}

fn bind_project_clicks(
    document: &Document,
    config: &Config,
    app: &Rc<RefCell<BrowserApp>>,
) -> Result<(), JsValue> {
    let container = match document.get_element_by_id(&config.projects_container) {
        Some(el) => el,
        None => return Ok(()),
    };
    let app = Rc::clone(app);
    listen(&container, "click", move |event| {
        let click = classify_card_click(&event);
        app.borrow_mut().handle_click(click);
    })
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn classify_card_click(event: &Event) -> Click {
    let target = match event_element(event) {
        Some(el) => el,
        None => return Click::Elsewhere,
    };
    let inside_link = matches!(target.closest("a"), Ok(Some(_)));
    let card_id = match target.closest(".project-card") {
        Ok(Some(card)) => card.get_attribute("data-project-id"),
        _ => None,
    };
    Click::in_projects(inside_link, card_id)
}
