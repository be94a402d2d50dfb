//! Diagram elements the net is mapped onto

use crate::{ElementId, Error, ResourceId, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What kind of diagram element this is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ElementKind {
    /// Activity, event, or any other plain node
    #[default]
    Node,
    /// Exclusive (data-based) branch choice
    DecisionGateway,
    /// Any gateway that does not choose a single branch
    Gateway,
    /// Sub-process style node containing other elements
    Composite {
        /// Contained elements
        children: Vec<ElementId>,
    },
    /// Sequence flow between two elements
    Edge {
        /// Element the edge leaves from
        source: ElementId,
        /// Element the edge points to
        target: ElementId,
    },
}

/// A single element of the process diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramElement {
    /// Handle in the diagram store
    pub id: ElementId,
    /// Stable identifier; absent for elements the user cannot see
    pub resource_id: Option<ResourceId>,
    /// Element kind with kind-specific data
    pub kind: ElementKind,
}

impl DiagramElement {
    /// Create a new element
    pub fn new(id: ElementId, resource_id: Option<ResourceId>, kind: ElementKind) -> Self {
        Self {
            id,
            resource_id,
            kind,
        }
    }

    /// Whether the element has a user-facing identifier
    pub fn is_visible(&self) -> bool {
        self.resource_id.is_some()
    }

    /// Whether the element's identifier equals `resource_id`
    ///
    /// An element without an identifier never matches.
    pub fn matches(&self, resource_id: &str) -> bool {
        self.resource_id
            .as_ref()
            .is_some_and(|id| id.as_str() == resource_id)
    }

    /// Number of contained elements (zero for anything but composites)
    pub fn child_count(&self) -> usize {
        match &self.kind {
            ElementKind::Composite { children } => children.len(),
            _ => 0,
        }
    }

    /// Composite element with at least one child
    pub fn is_populated_composite(&self) -> bool {
        self.child_count() > 0
    }

    pub fn is_decision_gateway(&self) -> bool {
        matches!(self.kind, ElementKind::DecisionGateway)
    }

    /// Source element if this is an edge
    pub fn edge_source(&self) -> Option<ElementId> {
        match self.kind {
            ElementKind::Edge { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Storage for all diagram elements, in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagram {
    elements: IndexMap<ElementId, DiagramElement>,
}

impl Diagram {
    /// Create an empty diagram
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element and return its handle
    ///
    /// Visible identifiers must be unique across the diagram; edges must
    /// reference elements that already exist.
    pub fn add(
        &mut self,
        resource_id: Option<ResourceId>,
        kind: ElementKind,
    ) -> Result<ElementId> {
        if let Some(rid) = &resource_id {
            if self.by_resource_id(rid.as_str()).is_some() {
                return Err(Error::DuplicateResourceId(rid.to_string()));
            }
        }
        if let ElementKind::Edge { source, target } = &kind {
            for end in [source, target] {
                if !self.elements.contains_key(end) {
                    return Err(Error::UnknownElement(*end));
                }
            }
        }

        let id = ElementId::new(self.elements.len());
        self.elements
            .insert(id, DiagramElement::new(id, resource_id, kind));
        Ok(id)
    }

    /// Add a visible plain node
    pub fn add_node(&mut self, resource_id: impl Into<ResourceId>) -> Result<ElementId> {
        self.add(Some(resource_id.into()), ElementKind::Node)
    }

    /// Get an element by handle
    pub fn get(&self, id: ElementId) -> Option<&DiagramElement> {
        self.elements.get(&id)
    }

    /// Find the element with the given visible identifier
    pub fn by_resource_id(&self, resource_id: &str) -> Option<&DiagramElement> {
        self.elements.values().find(|e| e.matches(resource_id))
    }

    /// The decision gateway an edge leaves from, if any
    pub fn decision_source_of(&self, id: ElementId) -> Option<&DiagramElement> {
        self.get(id)
            .and_then(DiagramElement::edge_source)
            .and_then(|source| self.get(source))
            .filter(|source| source.is_decision_gateway())
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Iterate over all elements in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DiagramElement> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_requires_identifier() {
        let hidden = DiagramElement::new(ElementId::new(0), None, ElementKind::Node);
        assert!(!hidden.is_visible());
        assert!(!hidden.matches(""));
        assert!(!hidden.matches("A"));

        let shown = DiagramElement::new(
            ElementId::new(1),
            Some(ResourceId::new("A")),
            ElementKind::Node,
        );
        assert!(shown.matches("A"));
        assert!(!shown.matches("B"));
    }

    #[test]
    fn test_duplicate_resource_id_rejected() {
        let mut diagram = Diagram::new();
        diagram.add_node("A").unwrap();
        assert_eq!(
            diagram.add_node("A"),
            Err(Error::DuplicateResourceId("A".to_string()))
        );
        // Hidden elements may share the absent identifier
        diagram.add(None, ElementKind::Node).unwrap();
        diagram.add(None, ElementKind::Node).unwrap();
        assert_eq!(diagram.len(), 3);
    }

    #[test]
    fn test_edge_requires_known_ends() {
        let mut diagram = Diagram::new();
        let a = diagram.add_node("A").unwrap();
        let err = diagram
            .add(
                Some("E".into()),
                ElementKind::Edge {
                    source: a,
                    target: ElementId::new(9),
                },
            )
            .unwrap_err();
        assert_eq!(err, Error::UnknownElement(ElementId::new(9)));
    }

    #[test]
    fn test_decision_source_of() {
        let mut diagram = Diagram::new();
        let xor = diagram
            .add(Some("G".into()), ElementKind::DecisionGateway)
            .unwrap();
        let and = diagram.add(Some("P".into()), ElementKind::Gateway).unwrap();
        let task = diagram.add_node("T").unwrap();
        let from_xor = diagram
            .add(
                Some("E1".into()),
                ElementKind::Edge {
                    source: xor,
                    target: task,
                },
            )
            .unwrap();
        let from_and = diagram
            .add(
                Some("E2".into()),
                ElementKind::Edge {
                    source: and,
                    target: task,
                },
            )
            .unwrap();

        assert_eq!(diagram.decision_source_of(from_xor).map(|e| e.id), Some(xor));
        assert!(diagram.decision_source_of(from_and).is_none());
        assert!(diagram.decision_source_of(task).is_none());
    }

    #[test]
    fn test_child_count() {
        let mut diagram = Diagram::new();
        let inner = diagram.add_node("inner").unwrap();
        let sub = diagram
            .add(
                Some("S".into()),
                ElementKind::Composite {
                    children: vec![inner],
                },
            )
            .unwrap();
        let empty = diagram
            .add(
                Some("S2".into()),
                ElementKind::Composite { children: vec![] },
            )
            .unwrap();

        assert!(diagram.get(sub).unwrap().is_populated_composite());
        assert!(!diagram.get(empty).unwrap().is_populated_composite());
        assert_eq!(diagram.get(inner).unwrap().child_count(), 0);
    }
}
