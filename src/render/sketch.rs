//! A small SVG renderer standing in for the diagram engine's base renderer.
//!
//! Shapes are drawn with engine-style default colors and composite children
//! (task markers, gateway markers, arrow heads) at the element's bounds.

use std::fmt::Write as _;

use super::chain::Renderer;
use super::element::{BpmnElement, DiagramElement, ElementKind};
use super::node::SvgNode;
use crate::geometry::{Bounds, Point};

pub const DEFAULT_STROKE: &str = "#22242a";
pub const DEFAULT_FILL: &str = "#ffffff";
const TASK_RADIUS: u32 = 10;
const LABEL_FONT_SIZE: u32 = 11;

#[derive(Debug, Clone, Copy, Default)]
pub struct SketchRenderer;

impl SketchRenderer {
    pub const fn new() -> Self {
        Self
    }

    fn visual(element: &BpmnElement) -> SvgNode {
        let Bounds { x, y, .. } = element.bounds;
        SvgNode::new("g")
            .with_attr("class", "djs-visual")
            .with_attr("data-element-id", &element.id)
            .with_attr("transform", format!("translate({x} {y})"))
    }

    fn body(element: &BpmnElement) -> SvgNode {
        let bounds = element.bounds;
        let (cx, cy) = bounds.local_center();
        let kind = ElementKind::classify(element);
        match kind {
            ElementKind::Task => {
                let mut body = outlined(
                    SvgNode::new("rect")
                        .with_attr("width", bounds.width)
                        .with_attr("height", bounds.height)
                        .with_attr("rx", TASK_RADIUS),
                    2,
                );
                if element.local_type() != "Task" {
                    body = SvgNode::new("g")
                        .with_child(body)
                        .with_child(task_marker(element.local_type()));
                }
                body
            }
            ElementKind::StartEvent | ElementKind::EndEvent => {
                let width = if kind == ElementKind::EndEvent {
                    4
                } else {
                    2
                };
                outlined(
                    SvgNode::new("circle")
                        .with_attr("cx", cx)
                        .with_attr("cy", cy)
                        .with_attr("r", bounds.min_side() / 2),
                    width,
                )
            }
            ElementKind::Gateway => {
                let diamond = outlined(
                    SvgNode::new("polygon").with_attr(
                        "points",
                        format!(
                            "{cx},0 {w},{cy} {cx},{h} 0,{cy}",
                            w = bounds.width,
                            h = bounds.height
                        ),
                    ),
                    2,
                );
                match gateway_marker(element.local_type(), cx, cy) {
                    Some(marker) => SvgNode::new("g").with_child(diamond).with_child(marker),
                    None => diamond,
                }
            }
            ElementKind::Container | ElementKind::Other => outlined(
                SvgNode::new("rect")
                    .with_attr("width", bounds.width)
                    .with_attr("height", bounds.height),
                1,
            ),
        }
    }

    fn label(element: &BpmnElement) -> SvgNode {
        SvgNode::new("text")
            .with_attr("font-size", LABEL_FONT_SIZE)
            .with_attr("fill", DEFAULT_STROKE)
            .with_attr("data-label-for", element.label_target.as_deref().unwrap_or_default())
    }
}

impl Renderer for SketchRenderer {
    type Element = BpmnElement;
    type Node = SvgNode;

    fn can_render(&self, _element: &BpmnElement) -> bool {
        true
    }

    fn draw_shape<'a>(
        &mut self,
        container: &'a mut SvgNode,
        element: &BpmnElement,
    ) -> Option<&'a mut SvgNode> {
        let content = if element.is_label() {
            Self::label(element)
        } else {
            Self::body(element)
        };
        Some(container.push_child(Self::visual(element).with_child(content)))
    }

    fn draw_connection<'a>(
        &mut self,
        container: &'a mut SvgNode,
        element: &BpmnElement,
    ) -> Option<&'a mut SvgNode> {
        if element.waypoints.len() < 2 {
            tracing::debug!(id = %element.id, "connection without enough waypoints");
            return None;
        }

        let line = SvgNode::new("path")
            .with_attr("d", path_data(&element.waypoints))
            .with_attr("fill", "none")
            .with_attr("stroke", DEFAULT_STROKE)
            .with_attr("stroke-width", 2);
        let mut visual = SvgNode::new("g")
            .with_attr("class", "djs-visual")
            .with_attr("data-element-id", &element.id)
            .with_child(line);
        if let [.., from, to] = element.waypoints.as_slice() {
            visual = visual.with_child(arrow_head(*from, *to));
        }
        Some(container.push_child(visual))
    }
}

fn outlined(node: SvgNode, stroke_width: u32) -> SvgNode {
    node.with_attr("fill", DEFAULT_FILL)
        .with_attr("stroke", DEFAULT_STROKE)
        .with_attr("stroke-width", stroke_width)
}

fn task_marker(local_type: &str) -> SvgNode {
    let glyph = match local_type {
        "UserTask" => "M15,12 a4,4 0 1,0 0.1,0 M9,26 q6,-8 12,0 z",
        "ServiceTask" => "M12,10 l6,0 l0,6 l-6,0 z M15,8 l0,10 M10,13 l10,0",
        _ => "M10,10 l10,0 l0,10 l-10,0 z",
    };
    SvgNode::new("path")
        .with_attr("d", glyph)
        .with_attr("fill", DEFAULT_STROKE)
        .with_attr("stroke", DEFAULT_STROKE)
        .with_attr("stroke-width", 1)
}

fn gateway_marker(local_type: &str, cx: u32, cy: u32) -> Option<SvgNode> {
    let d = match local_type {
        "ExclusiveGateway" => format!(
            "M{},{} l10,10 M{},{} l-10,10",
            cx.saturating_sub(5),
            cy.saturating_sub(5),
            cx + 5,
            cy.saturating_sub(5)
        ),
        "ParallelGateway" => format!(
            "M{cx},{} l0,14 M{},{cy} l14,0",
            cy.saturating_sub(7),
            cx.saturating_sub(7)
        ),
        _ => return None,
    };
    Some(
        SvgNode::new("path")
            .with_attr("d", d)
            .with_attr("fill", DEFAULT_STROKE)
            .with_attr("stroke", DEFAULT_STROKE)
            .with_attr("stroke-width", 3),
    )
}

fn path_data(waypoints: &[Point]) -> String {
    let mut d = String::new();
    for (index, point) in waypoints.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        if index > 0 {
            d.push(' ');
        }
        let _ = write!(d, "{command}{},{}", point.x, point.y);
    }
    d
}

fn arrow_head(from: Point, to: Point) -> SvgNode {
    let (dx, dy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
    let back = Point::new(to.x - dx * 10, to.y - dy * 10);
    let (px, py) = (-dy * 4, dx * 4);
    SvgNode::new("path")
        .with_attr(
            "d",
            format!(
                "M{},{} L{},{} L{},{} Z",
                to.x,
                to.y,
                back.x + px,
                back.y + py,
                back.x - px,
                back.y - py
            ),
        )
        .with_attr("fill", DEFAULT_STROKE)
        .with_attr("stroke", DEFAULT_STROKE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::node::VisualNode;

    #[test]
    fn tasks_with_markers_are_composite() {
        let mut root = SvgNode::new("svg");
        let task = BpmnElement::shape("t", "bpmn:UserTask", Bounds::new(100, 40, 100, 80));
        let node = SketchRenderer::new().draw_shape(&mut root, &task).unwrap();

        assert_eq!(node.attribute("transform"), Some("translate(100 40)"));
        let body = &node.children()[0];
        assert_eq!(body.tag(), "g");
        assert_eq!(body.children()[0].tag(), "rect");
        assert_eq!(body.children()[1].attribute("fill"), Some(DEFAULT_STROKE));
    }

    #[test]
    fn events_draw_circles_with_engine_defaults() {
        let mut root = SvgNode::new("svg");
        let end = BpmnElement::shape("e", "bpmn:EndEvent", Bounds::new(0, 0, 36, 36));
        let node = SketchRenderer::new().draw_shape(&mut root, &end).unwrap();

        let circle = &node.children()[0];
        assert_eq!(circle.tag(), "circle");
        assert_eq!(circle.attribute("r"), Some("18"));
        assert_eq!(circle.attribute("stroke"), Some(DEFAULT_STROKE));
        assert_eq!(circle.attribute("stroke-width"), Some("4"));
    }

    #[test]
    fn connections_need_two_waypoints() {
        let mut root = SvgNode::new("svg");
        let stub = BpmnElement::connection("f", "bpmn:SequenceFlow", vec![Point::new(0, 0)]);
        assert!(SketchRenderer::new().draw_connection(&mut root, &stub).is_none());

        let flow = BpmnElement::connection(
            "f",
            "bpmn:SequenceFlow",
            vec![Point::new(0, 0), Point::new(0, 20), Point::new(40, 20)],
        );
        let node = SketchRenderer::new().draw_connection(&mut root, &flow).unwrap();
        assert_eq!(node.children()[0].attribute("d"), Some("M0,0 L0,20 L40,20"));
        assert_eq!(node.children().len(), 2);
    }
}
