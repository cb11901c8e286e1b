//! Client-side rendering for a static portfolio page: project cards, an
//! about section, a project details overlay, and persisted light/dark theme
//! and English/French locale preferences.
//!
//! The core is host-agnostic and drives the page through the [`page::Page`]
//! trait. On `wasm32` the [`web`] module binds it to the browser DOM.

pub mod app;
pub mod config;
pub mod i18n;
pub mod loader;
pub mod modal;
pub mod models;
pub mod page;
pub mod preferences;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod web;


pub use app::{App, AppState, Click};
pub use config::Config;
pub use loader::{ContentLoader, ContentSource, HttpSource, LoadError};
pub use models::content::{Content, Profile, Project, SocialLink};
