use crate::geometry::{Bounds, Point};

const BPMN_PREFIX: &str = "bpmn:";

const CONNECTION_TYPES: [&str; 5] = [
    "SequenceFlow",
    "MessageFlow",
    "Association",
    "DataInputAssociation",
    "DataOutputAssociation",
];

/// Base BPMN types the themed overlay distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BpmnType {
    Task,
    StartEvent,
    EndEvent,
    Gateway,
    Participant,
    Lane,
}

impl BpmnType {
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Task => "bpmn:Task",
            Self::StartEvent => "bpmn:StartEvent",
            Self::EndEvent => "bpmn:EndEvent",
            Self::Gateway => "bpmn:Gateway",
            Self::Participant => "bpmn:Participant",
            Self::Lane => "bpmn:Lane",
        }
    }
}

/// Read-only view of a diagram element supplied by the diagram engine.
pub trait DiagramElement {
    /// True when the element is `ty` or one of its subtypes.
    fn is_of_type(&self, ty: BpmnType) -> bool;

    /// True for pseudo-elements that only host another element's text label.
    fn is_label(&self) -> bool;
}

/// Paint classification, evaluated in declaration order; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Task,
    StartEvent,
    EndEvent,
    Gateway,
    /// Participants (pools) and lanes.
    Container,
    Other,
}

impl ElementKind {
    pub fn classify<E: DiagramElement + ?Sized>(element: &E) -> Self {
        if element.is_of_type(BpmnType::Task) {
            Self::Task
        } else if element.is_of_type(BpmnType::StartEvent) {
            Self::StartEvent
        } else if element.is_of_type(BpmnType::EndEvent) {
            Self::EndEvent
        } else if element.is_of_type(BpmnType::Gateway) {
            Self::Gateway
        } else if element.is_of_type(BpmnType::Participant) || element.is_of_type(BpmnType::Lane) {
            Self::Container
        } else {
            Self::Other
        }
    }
}

/// A BPMN model element identified by its type name (`bpmn:UserTask`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpmnElement {
    pub id: String,
    pub type_name: String,
    pub bounds: Bounds,
    pub waypoints: Vec<Point>,
    /// Id of the element whose label this pseudo-element renders.
    pub label_target: Option<String>,
}

impl BpmnElement {
    pub fn shape(id: impl Into<String>, type_name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            bounds,
            waypoints: Vec::new(),
            label_target: None,
        }
    }

    pub fn connection(
        id: impl Into<String>,
        type_name: impl Into<String>,
        waypoints: Vec<Point>,
    ) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            bounds: Bounds::default(),
            waypoints,
            label_target: None,
        }
    }

    pub fn label(id: impl Into<String>, target: &BpmnElement, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            type_name: target.type_name.clone(),
            bounds,
            waypoints: Vec::new(),
            label_target: Some(target.id.clone()),
        }
    }

    /// Flow and association types; their labels are shapes.
    pub fn is_connection(&self) -> bool {
        self.label_target.is_none()
            && CONNECTION_TYPES.iter().any(|ty| *ty == self.local_type())
    }

    /// Type name without the `bpmn:` namespace prefix.
    pub fn local_type(&self) -> &str {
        self.type_name
            .strip_prefix(BPMN_PREFIX)
            .unwrap_or(&self.type_name)
    }
}

impl DiagramElement for BpmnElement {
    fn is_of_type(&self, ty: BpmnType) -> bool {
        base_types(self.local_type()).contains(&ty)
    }

    fn is_label(&self) -> bool {
        self.label_target.is_some()
    }
}

fn base_types(local_type: &str) -> &'static [BpmnType] {
    match local_type {
        "Task" | "UserTask" | "ServiceTask" | "ScriptTask" | "ManualTask" | "SendTask"
        | "ReceiveTask" | "BusinessRuleTask" => &[BpmnType::Task],
        "StartEvent" => &[BpmnType::StartEvent],
        "EndEvent" => &[BpmnType::EndEvent],
        "Gateway" | "ExclusiveGateway" | "InclusiveGateway" | "ParallelGateway"
        | "ComplexGateway" | "EventBasedGateway" => &[BpmnType::Gateway],
        "Participant" => &[BpmnType::Participant],
        "Lane" => &[BpmnType::Lane],
        _ => &[],
    }
}
