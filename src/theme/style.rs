use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::rc::Rc;

use super::model::Theme;
use super::registry::ThemeRegistry;

/// Document-wide style scope that custom properties are written into.
pub trait StyleScope {
    fn set_property(&mut self, name: &str, value: &str);
}

/// Writes every palette variable of `theme` into `scope`.
///
/// Properties the theme does not define keep their previous values.
pub fn apply_theme(scope: &mut dyn StyleScope, theme: &Theme) {
    for (name, value) in &theme.css_vars {
        scope.set_property(name, value);
    }
    tracing::debug!(theme = %theme.id, vars = theme.css_vars.len(), "applied theme to style scope");
}

/// In-memory `:root` scope holding custom properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootStyle {
    properties: BTreeMap<String, String>,
}

impl RootStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.properties {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push_str("}\n");
        css
    }
}

impl StyleScope for RootStyle {
    fn set_property(&mut self, name: &str, value: &str) {
        if !name.starts_with("--") {
            tracing::debug!(name, "skipping non-custom style property");
            return;
        }
        self.properties.insert(name.to_string(), value.to_string());
    }
}

/// Keeps `style` in sync with the registry's active theme from now on.
pub fn bind_root_style(registry: &mut ThemeRegistry, style: Rc<RefCell<RootStyle>>) {
    registry.subscribe(move |theme| apply_theme(&mut *style.borrow_mut(), theme));
}
