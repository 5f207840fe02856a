use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_THEME_ID: &str = "default";
const DEFAULT_THEME_NAME: &str = "Default Light";

pub const VAR_BACKGROUND: &str = "--pp-bg";
pub const VAR_SURFACE: &str = "--pp-surface";
pub const VAR_BORDER: &str = "--pp-border";
pub const VAR_PRIMARY: &str = "--pp-primary";
pub const VAR_ACCENT: &str = "--pp-accent";
pub const VAR_SUCCESS: &str = "--pp-success";
pub const VAR_TEXT: &str = "--pp-text";
pub const VAR_MUTED_TEXT: &str = "--pp-muted-text";

/// A named palette of CSS custom properties (`--pp-<key>` to color).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_css_vars")]
    pub css_vars: BTreeMap<String, String>,
}

/// `null` becomes an empty name; other scalars keep their JSON text.
fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => name,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Keeps string values, stringifies numbers and booleans, drops everything else.
fn lenient_css_vars<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let Value::Object(vars) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(vars
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(value) => Some((name, value)),
            Value::Number(value) => Some((name, value.to_string())),
            Value::Bool(value) => Some((name, value.to_string())),
            _ => None,
        })
        .collect())
}

impl Theme {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            css_vars: BTreeMap::new(),
        }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.css_vars.insert(name.into(), value.into());
        self
    }

    /// Value of `name`, treating an empty string the same as a missing key.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.css_vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Persisted registry record, stored as `{ "currentThemeId", "themes" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSnapshot {
    pub current_theme_id: String,
    pub themes: Vec<Theme>,
}

pub fn default_theme() -> Theme {
    Theme::new(DEFAULT_THEME_ID, DEFAULT_THEME_NAME)
        .with_var(VAR_BACKGROUND, "#f5f7fb")
        .with_var(VAR_SURFACE, "#ffffff")
        .with_var(VAR_BORDER, "#d2d7e0")
        .with_var(VAR_PRIMARY, "#2563eb")
        .with_var(VAR_ACCENT, "#ec4899")
        .with_var(VAR_TEXT, "#111827")
        .with_var(VAR_MUTED_TEXT, "#6b7280")
}
