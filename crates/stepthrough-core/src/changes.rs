//! Change tracking for incremental UI refresh
//!
//! The tracker accumulates, across calls, every transition and decision
//! gateway whose observable state changed. It is only emptied by an explicit
//! [`ChangeTracker::clear`].
//!
//! # Wire format
//!
//! ```text
//! <resourceId>,<timesExecuted>,<t|f>;
//! ```
//!
//! Transition records come first, then gateway records, each group in
//! insertion order. Gateways always carry `-1,f`.

use crate::{Diagram, ElementId, ResourceId, SteppableTransition, TransitionId};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution count emitted for gateway records
pub const GATEWAY_TIMES_EXECUTED: i64 = -1;

/// One serialized change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Visible identifier of the changed element
    pub resource_id: ResourceId,
    /// Execution count, or [`GATEWAY_TIMES_EXECUTED`] for gateways
    pub times_executed: i64,
    /// Whether the element is currently enabled
    pub fireable: bool,
}

impl ChangeRecord {
    /// Record for a decision gateway whose branch was taken
    pub fn gateway(resource_id: ResourceId) -> Self {
        Self {
            resource_id,
            times_executed: GATEWAY_TIMES_EXECUTED,
            fireable: false,
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = if self.fireable { 't' } else { 'f' };
        write!(f, "{},{},{};", self.resource_id, self.times_executed, flag)
    }
}

/// What the tracker needs to know about the controller to render records
pub(crate) struct ChangeView<'a> {
    /// Steppable transitions by id
    pub(crate) transitions: &'a IndexMap<TransitionId, SteppableTransition>,
    /// Diagram the transitions are bound to
    pub(crate) diagram: &'a Diagram,
    /// Currently enabled transitions
    pub(crate) enabled: &'a IndexSet<TransitionId>,
}

/// Deduplicated, order-preserving record of changed transitions and gateways
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    transitions: IndexSet<TransitionId>,
    gateways: IndexSet<ElementId>,
}

impl ChangeTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker already holding `transitions`
    pub fn seeded(transitions: impl IntoIterator<Item = TransitionId>) -> Self {
        Self {
            transitions: transitions.into_iter().collect(),
            gateways: IndexSet::new(),
        }
    }

    /// Record a changed transition; returns false if it was already recorded
    pub fn record_transition(&mut self, id: TransitionId) -> bool {
        self.transitions.insert(id)
    }

    /// Record a decision gateway whose branch was taken
    pub fn record_gateway(&mut self, id: ElementId) -> bool {
        self.gateways.insert(id)
    }

    pub fn transitions(&self) -> impl Iterator<Item = TransitionId> + '_ {
        self.transitions.iter().copied()
    }

    pub fn gateways(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.gateways.iter().copied()
    }

    /// Empty both collections
    pub fn clear(&mut self) {
        self.transitions.clear();
        self.gateways.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty() && self.gateways.is_empty()
    }

    /// Records in wire order
    ///
    /// Invisible elements are skipped. A composite element with children is
    /// only reported while it is enabled.
    pub(crate) fn records(&self, view: &ChangeView<'_>) -> Vec<ChangeRecord> {
        let transitions = self.transitions.iter().filter_map(|id| {
            let transition = view.transitions.get(id)?;
            let element = transition.element(view.diagram)?;
            let resource_id = element.resource_id.clone()?;
            let fireable = view.enabled.contains(id);
            if element.is_populated_composite() && !fireable {
                return None;
            }
            Some(ChangeRecord {
                resource_id,
                times_executed: i64::try_from(transition.times_executed()).unwrap_or(i64::MAX),
                fireable,
            })
        });

        let gateways = self.gateways.iter().filter_map(|id| {
            let resource_id = view.diagram.get(*id)?.resource_id.clone()?;
            Some(ChangeRecord::gateway(resource_id))
        });

        transitions.chain(gateways).collect()
    }

    /// Records joined into the wire string
    pub(crate) fn render(&self, view: &ChangeView<'_>) -> String {
        self.records(view)
            .iter()
            .map(ChangeRecord::to_string)
            .collect()
    }
}

/// Export records as a JSON array
#[cfg(feature = "serde_json")]
pub fn records_to_json(records: &[ChangeRecord]) -> crate::Result<String> {
    serde_json::to_string(records).map_err(|e| crate::Error::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AutomationTier, ElementKind};

    struct Fixture {
        diagram: Diagram,
        transitions: IndexMap<TransitionId, SteppableTransition>,
        gateway: ElementId,
    }

    fn fixture() -> Fixture {
        let mut diagram = Diagram::new();
        let a = diagram.add_node("A").unwrap();
        let hidden = diagram.add(None, ElementKind::Node).unwrap();
        let sub = diagram
            .add(
                Some("S".into()),
                ElementKind::Composite { children: vec![a] },
            )
            .unwrap();
        let gateway = diagram
            .add(Some("G".into()), ElementKind::DecisionGateway)
            .unwrap();

        let mut transitions = IndexMap::new();
        for (i, element) in [Some(a), Some(hidden), Some(sub), None].into_iter().enumerate() {
            let id = TransitionId::new(i);
            transitions.insert(id, SteppableTransition::new(id, element, AutomationTier::Manual));
        }
        Fixture {
            diagram,
            transitions,
            gateway,
        }
    }

    #[test]
    fn test_record_display() {
        let record = ChangeRecord {
            resource_id: "A".into(),
            times_executed: 3,
            fireable: true,
        };
        assert_eq!(record.to_string(), "A,3,t;");
        assert_eq!(ChangeRecord::gateway("G".into()).to_string(), "G,-1,f;");
    }

    #[test]
    fn test_dedup_preserves_first_insertion() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.record_transition(TransitionId::new(2)));
        assert!(tracker.record_transition(TransitionId::new(0)));
        assert!(!tracker.record_transition(TransitionId::new(2)));
        assert_eq!(
            tracker.transitions().collect::<Vec<_>>(),
            vec![TransitionId::new(2), TransitionId::new(0)]
        );

        assert!(tracker.record_gateway(ElementId::new(1)));
        assert!(!tracker.record_gateway(ElementId::new(1)));
        assert_eq!(tracker.gateways().count(), 1);
    }

    #[test]
    fn test_render_skips_invisible_and_orders_gateways_last() {
        let mut fx = fixture();
        if let Some(t) = fx.transitions.get_mut(&TransitionId::new(0)) {
            t.record_firing();
        }
        let mut tracker = ChangeTracker::new();
        tracker.record_gateway(fx.gateway);
        for i in 0..4 {
            tracker.record_transition(TransitionId::new(i));
        }

        let enabled: IndexSet<_> = [TransitionId::new(0)].into_iter().collect();
        let view = ChangeView {
            transitions: &fx.transitions,
            diagram: &fx.diagram,
            enabled: &enabled,
        };
        // Hidden element, unbound transition and idle composite are all omitted
        assert_eq!(tracker.render(&view), "A,1,t;G,-1,f;");
    }

    #[test]
    fn test_enabled_composite_is_reported() {
        let fx = fixture();
        let tracker = ChangeTracker::seeded([TransitionId::new(2)]);
        let enabled: IndexSet<_> = [TransitionId::new(2)].into_iter().collect();
        let view = ChangeView {
            transitions: &fx.transitions,
            diagram: &fx.diagram,
            enabled: &enabled,
        };
        assert_eq!(tracker.render(&view), "S,0,t;");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let fx = fixture();
        let mut tracker = ChangeTracker::seeded([TransitionId::new(0)]);
        tracker.record_gateway(fx.gateway);
        tracker.clear();
        tracker.clear();
        assert!(tracker.is_empty());

        let enabled = IndexSet::new();
        let view = ChangeView {
            transitions: &fx.transitions,
            diagram: &fx.diagram,
            enabled: &enabled,
        };
        assert_eq!(tracker.render(&view), "");
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_records_to_json() {
        let json = records_to_json(&[ChangeRecord::gateway("G".into())]).unwrap();
        assert_eq!(
            json,
            r#"[{"resource_id":"G","times_executed":-1,"fireable":false}]"#
        );
    }
}
