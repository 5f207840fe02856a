use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::model::{default_theme, Theme, ThemeSnapshot};
use crate::storage::KeyValueStore;

pub const THEME_STORAGE_KEY: &str = "ipm-theme-store";

pub type SharedRegistry = Rc<RefCell<ThemeRegistry>>;

type ThemeListener = Box<dyn FnMut(&Theme)>;

#[derive(Debug, Error)]
enum SnapshotError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot is not a JSON object")]
    NotAnObject,
}

/// Fields recovered from a persisted snapshot; `None` keeps the in-memory value.
#[derive(Debug, Default)]
struct SnapshotUpdate {
    current_theme_id: Option<String>,
    themes: Option<Vec<Theme>>,
}

/// Known themes plus the active selection, written through to a key-value store.
///
/// `themes` is never empty: it starts with the built-in default and is only
/// ever replaced by a non-empty list.
pub struct ThemeRegistry {
    current_theme_id: String,
    themes: Vec<Theme>,
    store: Option<Box<dyn KeyValueStore>>,
    listeners: Vec<ThemeListener>,
}

impl ThemeRegistry {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::with_store(Some(Box::new(store)))
    }

    /// A registry without durable storage; persisting is a no-op.
    pub fn detached() -> Self {
        Self::with_store(None)
    }

    fn with_store(store: Option<Box<dyn KeyValueStore>>) -> Self {
        let theme = default_theme();
        Self {
            current_theme_id: theme.id.clone(),
            themes: vec![theme],
            store,
            listeners: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedRegistry {
        Rc::new(RefCell::new(self))
    }

    pub fn current_theme_id(&self) -> &str {
        &self.current_theme_id
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    #[cfg(test)]
    fn store(&self) -> Option<&dyn KeyValueStore> {
        self.store.as_deref()
    }

    /// The selected theme, or the first one when the selection matches nothing.
    pub fn current_theme(&self) -> &Theme {
        resolve_current(&self.themes, &self.current_theme_id)
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            current_theme_id: self.current_theme_id.clone(),
            themes: self.themes.clone(),
        }
    }

    /// Registers `listener` and immediately calls it with the current theme.
    pub fn subscribe(&mut self, listener: impl FnMut(&Theme) + 'static) {
        let mut listener: ThemeListener = Box::new(listener);
        listener(resolve_current(&self.themes, &self.current_theme_id));
        self.listeners.push(listener);
    }

    pub fn init_from_storage(&mut self) {
        let Some(store) = self.store.as_deref() else {
            return;
        };

        let saved = match store.get(THEME_STORAGE_KEY) {
            Ok(saved) => saved.filter(|raw| !raw.is_empty()),
            Err(err) => {
                tracing::warn!(?err, "failed to read saved theme data");
                None
            }
        };
        let Some(saved) = saved else {
            tracing::debug!("no saved theme data; persisting defaults");
            self.persist();
            return;
        };

        match parse_snapshot(&saved) {
            Ok(update) => {
                if let Some(themes) = update.themes {
                    self.themes = themes;
                }
                if let Some(id) = update.current_theme_id {
                    self.current_theme_id = id;
                }
                tracing::info!(
                    current = %self.current_theme_id,
                    themes = self.themes.len(),
                    "restored theme data"
                );
            }
            Err(err) => {
                tracing::warn!(%err, "failed to parse saved theme data; reverting to default theme");
                let theme = default_theme();
                self.current_theme_id = theme.id.clone();
                self.themes = vec![theme];
            }
        }

        self.persist();
        self.notify();
    }

    /// Selects `id`; unknown ids are ignored.
    pub fn set_current_theme(&mut self, id: &str) {
        if !self.themes.iter().any(|theme| theme.id == id) {
            tracing::debug!(id, "ignoring selection of unknown theme");
            return;
        }

        self.current_theme_id = id.to_string();
        self.persist();
        self.notify();
    }

    /// Replaces the theme with the same id in place, or appends it.
    pub fn upsert_theme(&mut self, theme: Theme) {
        if theme.id.is_empty() {
            tracing::debug!("ignoring theme without id");
            return;
        }

        match self.themes.iter().position(|item| item.id == theme.id) {
            Some(index) => self.themes[index] = theme,
            None => self.themes.push(theme),
        }

        self.persist();
        self.notify();
    }

    pub fn persist(&mut self) {
        let Some(store) = self.store.as_deref_mut() else {
            return;
        };

        let snapshot = ThemeSnapshot {
            current_theme_id: self.current_theme_id.clone(),
            themes: self.themes.clone(),
        };
        let serialized = match serde_json::to_string(&snapshot) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(?err, "failed to serialize theme data");
                return;
            }
        };
        if let Err(err) = store.set(THEME_STORAGE_KEY, &serialized) {
            tracing::warn!(?err, "failed to persist theme data");
        }
    }

    fn notify(&mut self) {
        let theme = resolve_current(&self.themes, &self.current_theme_id);
        for listener in &mut self.listeners {
            listener(theme);
        }
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::detached()
    }
}

impl fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("current_theme_id", &self.current_theme_id)
            .field("themes", &self.themes)
            .field("has_store", &self.store.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn resolve_current<'a>(themes: &'a [Theme], id: &str) -> &'a Theme {
    themes
        .iter()
        .find(|theme| theme.id == id)
        .unwrap_or(&themes[0])
}

fn parse_snapshot(raw: &str) -> Result<SnapshotUpdate, SnapshotError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(fields) = value else {
        return Err(SnapshotError::NotAnObject);
    };

    let mut update = SnapshotUpdate::default();
    if let Some(entries) = fields.get("themes").and_then(Value::as_array) {
        let themes = decode_themes(entries);
        if !themes.is_empty() {
            update.themes = Some(themes);
        }
    }
    if let Some(id) = fields.get("currentThemeId").and_then(Value::as_str) {
        update.current_theme_id = Some(id.to_string());
    }
    Ok(update)
}

/// Decodes each entry on its own so one bad record cannot discard the rest.
fn decode_themes(entries: &[Value]) -> Vec<Theme> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match Theme::deserialize(entry) {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::warn!(index, %err, "skipping unreadable saved theme");
                None
            }
        })
        .collect()
}
