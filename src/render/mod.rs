//! Themed diagram rendering: element classification, visual nodes, and the
//! overlay that repaints a base renderer's output with the active theme.

pub mod chain;
pub mod colors;
pub mod element;
pub mod node;
pub mod overlay;
pub mod preview;
pub mod sketch;

pub use chain::{Renderer, RendererChain, DEFAULT_RENDER_PRIORITY};
pub use colors::{
    apply_and_cascade, connection_colors, resolve_colors, shape_colors, PaintAttrs, Palette,
};
pub use element::{BpmnElement, BpmnType, DiagramElement, ElementKind};
pub use node::{SvgNode, VisualNode};
pub use overlay::{ThemeSource, ThemedRenderer, THEMED_RENDER_PRIORITY};
pub use preview::{render_diagram, render_preview, sample_diagram};
pub use sketch::SketchRenderer;
