//! Color themes: palette model, persisted registry, and page-wide style propagation.

pub mod model;
pub mod registry;
pub mod style;

pub use model::{
    default_theme, Theme, ThemeSnapshot, DEFAULT_THEME_ID, VAR_ACCENT, VAR_BACKGROUND,
    VAR_BORDER, VAR_MUTED_TEXT, VAR_PRIMARY, VAR_SUCCESS, VAR_SURFACE, VAR_TEXT,
};
pub use registry::{SharedRegistry, ThemeRegistry, THEME_STORAGE_KEY};
pub use style::{apply_theme, bind_root_style, RootStyle, StyleScope};
