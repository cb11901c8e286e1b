use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::i18n::{LocalizedText, UiLabels};

/// The whole content document. Loaded once per page; never mutated by rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    pub profile: Option<Profile>,
    #[serde(deserialize_with = "nullable_items")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "nullable_entries")]
    pub ui: UiLabels,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub description: Option<LocalizedText>,
    pub full_description: Option<LocalizedText>,
    /// Any JSON number; integers in practice.
    #[serde(deserialize_with = "nullable")]
    pub order: f64,
    pub image: Option<String>,
    #[serde(deserialize_with = "nullable_items")]
    pub tags: Vec<String>,
    pub source_url: Option<String>,
    pub demo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub headline: Option<LocalizedText>,
    pub bio: Option<LocalizedText>,
    pub image: Option<String>,
    #[serde(deserialize_with = "nullable_items")]
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "nullable")]
    pub platform: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

impl Content {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

impl Project {
    /// Modal body text: the long description when it has something to say,
    /// otherwise the card description.
    pub fn detail_text(&self) -> Option<&LocalizedText> {
        self.full_description
            .as_ref()
            .filter(|d| !d.is_empty())
            .or(self.description.as_ref())
    }
}

/// Treat an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list where the list itself or any entry may be `null`; null entries are dropped.
fn nullable_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

/// A map where the map itself or any value may be `null`; null values are dropped.
fn nullable_entries<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<BTreeMap<String, Option<T>>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect())
}
