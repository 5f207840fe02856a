use super::chain::RendererChain;
use super::element::BpmnElement;
use super::node::SvgNode;
use super::overlay::{ThemeSource, ThemedRenderer};
use super::sketch::SketchRenderer;
use crate::geometry::{Bounds, Point};

const PREVIEW_WIDTH: u32 = 720;
const PREVIEW_HEIGHT: u32 = 260;

/// A small pool with one path from start to end, used for theme previews.
pub fn sample_diagram() -> Vec<BpmnElement> {
    let start = BpmnElement::shape("StartEvent_1", "bpmn:StartEvent", Bounds::new(90, 112, 36, 36));
    let task = BpmnElement::shape("Task_1", "bpmn:UserTask", Bounds::new(180, 90, 100, 80));
    let gateway =
        BpmnElement::shape("Gateway_1", "bpmn:ExclusiveGateway", Bounds::new(340, 105, 50, 50));
    let end = BpmnElement::shape("EndEvent_1", "bpmn:EndEvent", Bounds::new(460, 112, 36, 36));
    let start_label = BpmnElement::label("StartEvent_1_label", &start, Bounds::new(84, 152, 48, 14));

    vec![
        BpmnElement::shape("Participant_1", "bpmn:Participant", Bounds::new(40, 40, 640, 180)),
        start,
        start_label,
        task,
        gateway,
        end,
        BpmnElement::connection(
            "Flow_1",
            "bpmn:SequenceFlow",
            vec![Point::new(126, 130), Point::new(180, 130)],
        ),
        BpmnElement::connection(
            "Flow_2",
            "bpmn:SequenceFlow",
            vec![Point::new(280, 130), Point::new(340, 130)],
        ),
        BpmnElement::connection(
            "Flow_3",
            "bpmn:SequenceFlow",
            vec![Point::new(390, 130), Point::new(460, 130)],
        ),
    ]
}

/// Draws `elements` through the themed overlay above a plain base renderer.
pub fn render_diagram(elements: &[BpmnElement], theme: ThemeSource) -> SvgNode {
    let mut chain = RendererChain::new();
    chain.register(SketchRenderer::new());
    chain.register(ThemedRenderer::new(SketchRenderer::new(), theme));

    let mut root = SvgNode::new("svg")
        .with_attr("xmlns", "http://www.w3.org/2000/svg")
        .with_attr("viewBox", format!("0 0 {PREVIEW_WIDTH} {PREVIEW_HEIGHT}"));
    for element in elements {
        let drawn = if element.is_connection() {
            chain.draw_connection(&mut root, element)
        } else {
            chain.draw_shape(&mut root, element)
        };
        if drawn.is_none() {
            tracing::debug!(id = %element.id, "element produced no visual");
        }
    }
    root
}

pub fn render_preview(theme: ThemeSource) -> String {
    render_diagram(&sample_diagram(), theme).to_svg()
}
