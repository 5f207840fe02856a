use std::fmt;

use super::chain::Renderer;
use super::colors::{apply_and_cascade, connection_colors, resolve_colors};
use super::element::DiagramElement;
use crate::theme::{SharedRegistry, Theme};

/// Runs above the base renderer (default priority 1000).
pub const THEMED_RENDER_PRIORITY: u32 = 1500;

/// Where the overlay reads the active theme from on each draw call.
pub enum ThemeSource {
    Static(Theme),
    Accessor(Box<dyn Fn() -> Theme>),
}

impl ThemeSource {
    pub fn accessor(accessor: impl Fn() -> Theme + 'static) -> Self {
        Self::Accessor(Box::new(accessor))
    }

    /// Follows the registry's active theme.
    pub fn from_registry(registry: SharedRegistry) -> Self {
        Self::accessor(move || match registry.try_borrow() {
            Ok(registry) => registry.current_theme().clone(),
            Err(_) => {
                tracing::warn!("theme registry busy during draw; painting with fallback colors");
                Theme::default()
            }
        })
    }

    pub fn current(&self) -> Theme {
        match self {
            Self::Static(theme) => theme.clone(),
            Self::Accessor(accessor) => accessor(),
        }
    }
}

impl Default for ThemeSource {
    fn default() -> Self {
        Self::Static(Theme::default())
    }
}

impl fmt::Debug for ThemeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(theme) => f.debug_tuple("Static").field(&theme.id).finish(),
            Self::Accessor(_) => f.write_str("Accessor"),
        }
    }
}

/// Repaints everything the wrapped renderer draws with the active theme.
///
/// Labels are declined so they stay with the base renderer.
#[derive(Debug)]
pub struct ThemedRenderer<R> {
    base: R,
    theme: ThemeSource,
}

impl<R: Renderer> ThemedRenderer<R> {
    pub fn new(base: R, theme: ThemeSource) -> Self {
        Self { base, theme }
    }
}

impl<R: Renderer> Renderer for ThemedRenderer<R> {
    type Element = R::Element;
    type Node = R::Node;

    fn priority(&self) -> u32 {
        THEMED_RENDER_PRIORITY
    }

    fn can_render(&self, element: &Self::Element) -> bool {
        !element.is_label()
    }

    fn draw_shape<'a>(
        &mut self,
        container: &'a mut Self::Node,
        element: &Self::Element,
    ) -> Option<&'a mut Self::Node> {
        let node = self.base.draw_shape(container, element)?;
        let theme = self.theme.current();
        let colors = resolve_colors(element, &theme);
        tracing::trace!(theme = %theme.id, ?colors, "painting shape");
        apply_and_cascade(&mut *node, &colors);
        Some(node)
    }

    fn draw_connection<'a>(
        &mut self,
        container: &'a mut Self::Node,
        element: &Self::Element,
    ) -> Option<&'a mut Self::Node> {
        let node = self.base.draw_connection(container, element)?;
        let colors = connection_colors(&self.theme.current());
        apply_and_cascade(&mut *node, &colors);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::geometry::{Bounds, Point};
    use crate::render::element::BpmnElement;
    use crate::render::node::{SvgNode, VisualNode};
    use crate::render::sketch::SketchRenderer;
    use crate::theme::{ThemeRegistry, VAR_PRIMARY};

    struct Absent;

    impl Renderer for Absent {
        type Element = BpmnElement;
        type Node = SvgNode;

        fn can_render(&self, _element: &BpmnElement) -> bool {
            true
        }

        fn draw_shape<'a>(
            &mut self,
            _container: &'a mut SvgNode,
            _element: &BpmnElement,
        ) -> Option<&'a mut SvgNode> {
            None
        }

        fn draw_connection<'a>(
            &mut self,
            _container: &'a mut SvgNode,
            _element: &BpmnElement,
        ) -> Option<&'a mut SvgNode> {
            None
        }
    }

    fn task() -> BpmnElement {
        BpmnElement::shape("task", "bpmn:UserTask", Bounds::new(10, 10, 100, 80))
    }

    fn assert_all(node: &SvgNode, name: &str, value: &str) {
        node.walk(&mut |n| assert_eq!(n.attribute(name), Some(value), "<{}>", n.tag()));
    }

    #[test]
    fn declines_label_elements_only() {
        let renderer = ThemedRenderer::new(SketchRenderer::new(), ThemeSource::default());
        let task = task();
        let label = BpmnElement::label("task_label", &task, Bounds::default());

        assert!(renderer.can_render(&task));
        assert!(!renderer.can_render(&label));
        assert_eq!(renderer.priority(), THEMED_RENDER_PRIORITY);
    }

    #[test]
    fn draw_shape_overrides_base_colors_on_whole_subtree() {
        let theme = Theme::new("t", "T").with_var(VAR_PRIMARY, "#0000ff");
        let mut renderer = ThemedRenderer::new(SketchRenderer::new(), ThemeSource::Static(theme));
        let mut root = SvgNode::new("svg");

        let node = renderer.draw_shape(&mut root, &task()).unwrap();
        assert!(!node.children().is_empty());

        assert_all(&root.children()[0], "stroke", "#0000ff");
        assert_all(&root.children()[0], "fill", "#ffffff");
        assert_all(&root.children()[0], "stroke-width", "2");
    }

    #[test]
    fn draw_shape_keeps_structure() {
        let mut plain_root = SvgNode::new("svg");
        SketchRenderer::new().draw_shape(&mut plain_root, &task());

        let mut themed_root = SvgNode::new("svg");
        ThemedRenderer::new(SketchRenderer::new(), ThemeSource::default())
            .draw_shape(&mut themed_root, &task());

        let tags = |root: &SvgNode| {
            let mut tags = Vec::new();
            root.walk(&mut |n| tags.push(n.tag().to_string()));
            tags
        };
        assert_eq!(tags(&plain_root), tags(&themed_root));
    }

    #[test]
    fn draw_connection_paints_stroke_only() {
        let mut renderer = ThemedRenderer::new(SketchRenderer::new(), ThemeSource::default());
        let flow = BpmnElement::connection(
            "flow",
            "bpmn:SequenceFlow",
            vec![Point::new(0, 0), Point::new(50, 0)],
        );
        let mut root = SvgNode::new("svg");
        let mut base_root = SvgNode::new("svg");
        SketchRenderer::new().draw_connection(&mut base_root, &flow);

        renderer.draw_connection(&mut root, &flow).unwrap();

        assert_all(&root.children()[0], "stroke", "#2563eb");
        assert_eq!(
            root.children()[0].attribute("fill"),
            base_root.children()[0].attribute("fill")
        );
        assert_eq!(
            root.children()[0].attribute("stroke-width"),
            base_root.children()[0].attribute("stroke-width")
        );
    }

    #[test]
    fn absent_base_node_is_skipped() {
        let mut renderer = ThemedRenderer::new(Absent, ThemeSource::default());
        let mut root = SvgNode::new("svg");

        assert!(renderer.draw_shape(&mut root, &task()).is_none());
        assert!(renderer.draw_connection(&mut root, &task()).is_none());
        assert!(root.children().is_empty());
    }

    #[test]
    fn accessor_is_queried_on_every_draw() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut renderer = ThemedRenderer::new(
            SketchRenderer::new(),
            ThemeSource::accessor(move || {
                counter.set(counter.get() + 1);
                Theme::default()
            }),
        );
        let mut root = SvgNode::new("svg");

        renderer.draw_shape(&mut root, &task());
        renderer.draw_shape(&mut root, &task());

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn registry_source_follows_theme_switches() {
        let registry = ThemeRegistry::detached().into_shared();
        let mut renderer = ThemedRenderer::new(
            SketchRenderer::new(),
            ThemeSource::from_registry(Rc::clone(&registry)),
        );
        let mut root = SvgNode::new("svg");

        renderer.draw_shape(&mut root, &task());
        registry
            .borrow_mut()
            .upsert_theme(Theme::new("dark", "Dark").with_var(VAR_PRIMARY, "#000000"));
        registry.borrow_mut().set_current_theme("dark");
        renderer.draw_shape(&mut root, &task());

        assert_eq!(root.children()[0].attribute("stroke"), Some("#2563eb"));
        assert_eq!(root.children()[1].attribute("stroke"), Some("#000000"));
    }

    #[test]
    fn busy_registry_falls_back_to_default_colors() {
        let registry = ThemeRegistry::detached().into_shared();
        let source = ThemeSource::from_registry(Rc::clone(&registry));
        let _guard = registry.borrow_mut();

        assert_eq!(source.current(), Theme::default());
    }
}
