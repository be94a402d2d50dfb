//! Steppable transitions: net transitions bound to the diagram

use crate::{AutomationTier, Diagram, DiagramElement, ElementId, TransitionId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A net transition as seen by the step-through controller
///
/// Identity is the underlying [`TransitionId`]: two values with the same id
/// compare equal whatever their counters say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteppableTransition {
    /// Underlying net transition
    pub id: TransitionId,
    /// Visible diagram element, if any
    pub element: Option<ElementId>,
    /// Automation policy for this transition
    pub tier: AutomationTier,
    /// Runtime state: a loaded binding always starts at zero
    #[serde(skip_deserializing)]
    times_executed: u64,
}

impl SteppableTransition {
    /// Create a transition bound to a diagram element
    pub fn new(id: TransitionId, element: Option<ElementId>, tier: AutomationTier) -> Self {
        Self {
            id,
            element,
            tier,
            times_executed: 0,
        }
    }

    /// Create a manual transition with no diagram element
    pub fn invisible(id: TransitionId) -> Self {
        Self::new(id, None, AutomationTier::Manual)
    }

    /// Builder: set the automation tier
    pub fn with_tier(mut self, tier: AutomationTier) -> Self {
        self.tier = tier;
        self
    }

    /// How often this transition has fired
    pub fn times_executed(&self) -> u64 {
        self.times_executed
    }

    /// Count one firing
    pub fn record_firing(&mut self) {
        self.times_executed += 1;
    }

    /// The bound diagram element
    pub fn element<'a>(&self, diagram: &'a Diagram) -> Option<&'a DiagramElement> {
        self.element.and_then(|id| diagram.get(id))
    }

    /// No user-facing representation: no element, or an element without a
    /// resource identifier
    pub fn is_invisible(&self, diagram: &Diagram) -> bool {
        !self.element(diagram).is_some_and(DiagramElement::is_visible)
    }

    /// Whether the visible element carries `resource_id`
    pub fn matches(&self, diagram: &Diagram, resource_id: &str) -> bool {
        self.element(diagram)
            .is_some_and(|element| element.matches(resource_id))
    }
}

impl PartialEq for SteppableTransition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SteppableTransition {}

impl Hash for SteppableTransition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;

    #[test]
    fn test_counter_increments_by_one() {
        let mut t = SteppableTransition::invisible(TransitionId::new(0));
        assert_eq!(t.times_executed(), 0);
        t.record_firing();
        t.record_firing();
        assert_eq!(t.times_executed(), 2);
    }

    #[test]
    fn test_identity_ignores_counters() {
        let a = SteppableTransition::new(TransitionId::new(1), None, AutomationTier::Manual);
        let mut b = a.clone().with_tier(AutomationTier::FullAuto);
        b.record_firing();
        assert_eq!(a, b);
        assert_ne!(a, SteppableTransition::invisible(TransitionId::new(2)));
    }

    #[test]
    fn test_deserialized_counter_starts_at_zero() {
        let t: SteppableTransition = ron::from_str(
            "(id: TransitionId(4), element: None, tier: SemiAuto, times_executed: 9)",
        )
        .unwrap();
        assert_eq!(t.id, TransitionId::new(4));
        assert_eq!(t.tier, AutomationTier::SemiAuto);
        assert_eq!(t.times_executed(), 0);
    }

    #[test]
    fn test_visibility() {
        let mut diagram = Diagram::new();
        let shown = diagram.add_node("A").unwrap();
        let hidden = diagram.add(None, ElementKind::Node).unwrap();

        let visible = SteppableTransition::new(TransitionId::new(0), Some(shown), AutomationTier::Manual);
        assert!(!visible.is_invisible(&diagram));
        assert!(visible.matches(&diagram, "A"));

        let unnamed = SteppableTransition::new(TransitionId::new(1), Some(hidden), AutomationTier::Manual);
        assert!(unnamed.is_invisible(&diagram));
        assert!(!unnamed.matches(&diagram, "A"));

        assert!(SteppableTransition::invisible(TransitionId::new(2)).is_invisible(&diagram));
    }
}
