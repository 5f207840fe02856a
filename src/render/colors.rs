//! Theme-to-attribute resolution for shapes and connections.

use super::element::{DiagramElement, ElementKind};
use super::node::VisualNode;
use crate::theme::{
    Theme, VAR_ACCENT, VAR_BACKGROUND, VAR_BORDER, VAR_PRIMARY, VAR_SUCCESS, VAR_SURFACE,
};

pub const FALLBACK_PRIMARY: &str = "#2563eb";
pub const FALLBACK_ACCENT: &str = "#ec4899";
pub const FALLBACK_SURFACE: &str = "#ffffff";
pub const FALLBACK_BACKGROUND: &str = "#f5f7fb";
pub const FALLBACK_BORDER: &str = "#d2d7e0";
pub const FALLBACK_SUCCESS: &str = "#22c55e";

pub const TASK_FILL: &str = "#ffffff";
pub const EMPHASIS_STROKE_WIDTH: u32 = 2;

/// The six palette roles the overlay paints with, each always set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub primary: String,
    pub accent: String,
    pub surface: String,
    pub background: String,
    pub border: String,
    pub success: String,
}

impl Palette {
    pub fn resolve(theme: &Theme) -> Self {
        Self {
            primary: theme_var(theme, VAR_PRIMARY, FALLBACK_PRIMARY),
            accent: theme_var(theme, VAR_ACCENT, FALLBACK_ACCENT),
            surface: theme_var(theme, VAR_SURFACE, FALLBACK_SURFACE),
            background: theme_var(theme, VAR_BACKGROUND, FALLBACK_BACKGROUND),
            border: theme_var(theme, VAR_BORDER, FALLBACK_BORDER),
            success: theme_var(theme, VAR_SUCCESS, FALLBACK_SUCCESS),
        }
    }
}

fn theme_var(theme: &Theme, name: &str, fallback: &str) -> String {
    theme.var(name).unwrap_or(fallback).to_string()
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Presentation attributes to paint; `None` entries are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaintAttrs {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<u32>,
}

impl PaintAttrs {
    /// Attribute name/value pairs for the entries that are set.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::with_capacity(3);
        if let Some(fill) = &self.fill {
            entries.push(("fill", fill.clone()));
        }
        if let Some(stroke) = &self.stroke {
            entries.push(("stroke", stroke.clone()));
        }
        if let Some(width) = self.stroke_width {
            entries.push(("stroke-width", width.to_string()));
        }
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.stroke.is_none() && self.stroke_width.is_none()
    }
}

pub fn resolve_colors<E: DiagramElement + ?Sized>(element: &E, theme: &Theme) -> PaintAttrs {
    shape_colors(ElementKind::classify(element), &Palette::resolve(theme))
}

pub fn shape_colors(kind: ElementKind, palette: &Palette) -> PaintAttrs {
    let emphasized = |fill: &str, stroke: &str| PaintAttrs {
        fill: Some(fill.to_string()),
        stroke: Some(stroke.to_string()),
        stroke_width: Some(EMPHASIS_STROKE_WIDTH),
    };
    let plain = |fill: &str, stroke: &str| PaintAttrs {
        fill: Some(fill.to_string()),
        stroke: Some(stroke.to_string()),
        stroke_width: None,
    };

    match kind {
        ElementKind::Task => emphasized(TASK_FILL, &palette.primary),
        ElementKind::StartEvent => emphasized(
            &palette.surface,
            non_empty_or(&palette.success, &palette.primary),
        ),
        ElementKind::EndEvent => emphasized(
            &palette.surface,
            non_empty_or(&palette.accent, &palette.primary),
        ),
        ElementKind::Gateway => emphasized(&palette.surface, &palette.primary),
        ElementKind::Container => plain(&palette.background, &palette.border),
        ElementKind::Other => plain(&palette.surface, &palette.border),
    }
}

/// Connections only ever receive the primary color as stroke.
pub fn connection_colors(theme: &Theme) -> PaintAttrs {
    PaintAttrs {
        stroke: Some(theme_var(theme, VAR_PRIMARY, FALLBACK_PRIMARY)),
        ..PaintAttrs::default()
    }
}

/// Sets every present attribute on `node` and all of its descendants.
pub fn apply_and_cascade<N: VisualNode>(node: &mut N, attrs: &PaintAttrs) {
    let entries = attrs.entries();
    if entries.is_empty() {
        return;
    }
    paint_tree(node, &entries);
}

fn paint_tree<N: VisualNode>(node: &mut N, entries: &[(&'static str, String)]) {
    for (name, value) in entries {
        node.set_attribute(name, value);
    }
    for child in node.children_mut() {
        paint_tree(child, entries);
    }
}
