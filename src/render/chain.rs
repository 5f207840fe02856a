use super::element::DiagramElement;
use super::node::VisualNode;

pub const DEFAULT_RENDER_PRIORITY: u32 = 1000;

/// A pluggable element renderer, as registered with the diagram host.
pub trait Renderer {
    type Element: DiagramElement;
    type Node: VisualNode;

    fn priority(&self) -> u32 {
        DEFAULT_RENDER_PRIORITY
    }

    fn can_render(&self, element: &Self::Element) -> bool;

    /// Draws `element` into `container` and returns the new node.
    fn draw_shape<'a>(
        &mut self,
        container: &'a mut Self::Node,
        element: &Self::Element,
    ) -> Option<&'a mut Self::Node>;

    fn draw_connection<'a>(
        &mut self,
        container: &'a mut Self::Node,
        element: &Self::Element,
    ) -> Option<&'a mut Self::Node>;
}

type BoxedRenderer<E, N> = Box<dyn Renderer<Element = E, Node = N>>;

/// Draw-interception chain: each draw goes to the highest-priority renderer
/// that accepts the element. Equal priorities keep registration order.
pub struct RendererChain<E, N> {
    renderers: Vec<BoxedRenderer<E, N>>,
}

impl<E, N> RendererChain<E, N>
where
    E: DiagramElement + 'static,
    N: VisualNode + 'static,
{
    pub fn new() -> Self {
        Self {
            renderers: Vec::new(),
        }
    }

    pub fn register(&mut self, renderer: impl Renderer<Element = E, Node = N> + 'static) {
        let priority = renderer.priority();
        let index = self
            .renderers
            .iter()
            .position(|existing| existing.priority() < priority)
            .unwrap_or(self.renderers.len());
        tracing::debug!(priority, index, "registered renderer");
        self.renderers.insert(index, Box::new(renderer));
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Priority of the renderer that would handle `element`.
    pub fn handler_priority(&self, element: &E) -> Option<u32> {
        self.renderers
            .iter()
            .find(|renderer| renderer.can_render(element))
            .map(|renderer| renderer.priority())
    }

    pub fn draw_shape<'a>(&mut self, container: &'a mut N, element: &E) -> Option<&'a mut N> {
        let Some(renderer) = self.handler_for(element) else {
            tracing::debug!("no renderer accepts shape");
            return None;
        };
        renderer.draw_shape(container, element)
    }

    pub fn draw_connection<'a>(&mut self, container: &'a mut N, element: &E) -> Option<&'a mut N> {
        let Some(renderer) = self.handler_for(element) else {
            tracing::debug!("no renderer accepts connection");
            return None;
        };
        renderer.draw_connection(container, element)
    }

    fn handler_for(&mut self, element: &E) -> Option<&mut BoxedRenderer<E, N>> {
        self.renderers
            .iter_mut()
            .find(|renderer| renderer.can_render(element))
    }
}

impl<E, N> Default for RendererChain<E, N>
where
    E: DiagramElement + 'static,
    N: VisualNode + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::render::element::BpmnElement;
    use crate::render::node::SvgNode;

    struct Tagging {
        tag: &'static str,
        priority: u32,
        labels_only: bool,
    }

    impl Renderer for Tagging {
        type Element = BpmnElement;
        type Node = SvgNode;

        fn priority(&self) -> u32 {
            self.priority
        }

        fn can_render(&self, element: &BpmnElement) -> bool {
            !self.labels_only || element.is_label()
        }

        fn draw_shape<'a>(
            &mut self,
            container: &'a mut SvgNode,
            _element: &BpmnElement,
        ) -> Option<&'a mut SvgNode> {
            Some(container.push_child(SvgNode::new(self.tag)))
        }

        fn draw_connection<'a>(
            &mut self,
            container: &'a mut SvgNode,
            element: &BpmnElement,
        ) -> Option<&'a mut SvgNode> {
            self.draw_shape(container, element)
        }
    }

    fn tagging(tag: &'static str, priority: u32, labels_only: bool) -> Tagging {
        Tagging {
            tag,
            priority,
            labels_only,
        }
    }

    #[test]
    fn highest_priority_renderer_wins() {
        let mut chain = RendererChain::new();
        chain.register(tagging("base", DEFAULT_RENDER_PRIORITY, false));
        chain.register(tagging("high", 1500, false));
        chain.register(tagging("low", 500, false));

        let mut root = SvgNode::new("svg");
        let task = BpmnElement::shape("t", "bpmn:Task", Bounds::new(0, 0, 100, 80));
        let node = chain.draw_shape(&mut root, &task).unwrap();

        assert_eq!(node.tag(), "high");
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn equal_priorities_keep_registration_order() {
        let mut chain = RendererChain::new();
        chain.register(tagging("first", 1000, false));
        chain.register(tagging("second", 1000, false));

        let mut root = SvgNode::new("svg");
        let task = BpmnElement::shape("t", "bpmn:Task", Bounds::default());
        assert_eq!(chain.draw_shape(&mut root, &task).unwrap().tag(), "first");
    }

    #[test]
    fn declined_elements_fall_through_or_draw_nothing() {
        let mut chain = RendererChain::new();
        chain.register(tagging("labels", 1500, true));

        let task = BpmnElement::shape("t", "bpmn:Task", Bounds::default());
        let label = BpmnElement::label("t_label", &task, Bounds::default());
        let mut root = SvgNode::new("svg");

        assert!(chain.draw_shape(&mut root, &task).is_none());
        assert_eq!(chain.handler_priority(&label), Some(1500));
        assert_eq!(chain.draw_shape(&mut root, &label).unwrap().tag(), "labels");
        assert_eq!(root.children().len(), 1);
    }
}
