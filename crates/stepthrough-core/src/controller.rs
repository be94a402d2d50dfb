//! Step-through execution controller
//!
//! Owns the current marking of one simulation session and drives it in
//! response to user requests:
//!
//! 1. Invisible transitions are fired until none is enabled, after
//!    construction and after every firing.
//! 2. A user fires a visible element by its resource identifier.
//! 3. The automation cascade fires newly enabled transitions tier by tier,
//!    from the configured tier down to (excluding) `Manual`.
//! 4. The enabled set before and after the call is diffed into the
//!    [`ChangeTracker`].
//!
//! A controller is single-threaded: every operation runs to completion, and
//! the owner must serialize access to a given instance.

use crate::changes::{ChangeRecord, ChangeTracker, ChangeView};
use crate::{
    AutomationTier, Diagram, DiagramElement, Error, Interpreter, Result, StepConfig,
    SteppableTransition, TransitionId,
};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, trace};

/// Outcome of a successful [`StepController::fire_object`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FireReport {
    /// Visible firings in order: the requested transition, then every
    /// transition fired by the automation cascade
    pub fired: Vec<TransitionId>,
    /// Invisible transitions fired while stabilizing
    pub invisible_fired: usize,
}

impl FireReport {
    /// Transitions fired by the automation cascade
    pub fn auto_fired(&self) -> &[TransitionId] {
        self.fired.get(1..).unwrap_or_default()
    }
}

/// Step-through controller over an interpreter's net
pub struct StepController<I: Interpreter> {
    interpreter: I,
    net: I::Net,
    diagram: Diagram,
    transitions: IndexMap<TransitionId, SteppableTransition>,
    marking: I::Marking,
    config: StepConfig,
    changes: ChangeTracker,
}

impl<I: Interpreter> StepController<I> {
    /// Create a controller with the default configuration
    pub fn new(
        interpreter: I,
        net: I::Net,
        diagram: Diagram,
        transitions: impl IntoIterator<Item = SteppableTransition>,
    ) -> Result<Self> {
        Self::with_config(interpreter, net, diagram, transitions, StepConfig::default())
    }

    /// Create a controller
    ///
    /// Every net transition needs exactly one steppable binding, and bound
    /// elements must exist in `diagram`. The initial marking is stabilized
    /// and the change tracker is seeded with the transitions enabled
    /// afterwards.
    pub fn with_config(
        interpreter: I,
        net: I::Net,
        diagram: Diagram,
        transitions: impl IntoIterator<Item = SteppableTransition>,
        config: StepConfig,
    ) -> Result<Self> {
        let declared: IndexSet<TransitionId> = interpreter.transitions(&net).into_iter().collect();

        let mut bound: IndexMap<TransitionId, SteppableTransition> = IndexMap::new();
        for transition in transitions {
            if !declared.contains(&transition.id) {
                return Err(Error::UnknownTransition(transition.id));
            }
            if let Some(element) = transition.element {
                if !diagram.contains(element) {
                    return Err(Error::UnknownElement(element));
                }
            }
            if bound.contains_key(&transition.id) {
                return Err(Error::DuplicateBinding(transition.id));
            }
            bound.insert(transition.id, transition);
        }
        if let Some(missing) = declared.iter().find(|id| !bound.contains_key(*id)) {
            return Err(Error::MissingBinding(*missing));
        }
        // Interpreter order, so iteration matches the net
        bound.sort_by(|a, _, b, _| declared.get_index_of(a).cmp(&declared.get_index_of(b)));

        let marking = interpreter.initial_marking(&net);
        let mut controller = Self {
            interpreter,
            net,
            diagram,
            transitions: bound,
            marking,
            config,
            changes: ChangeTracker::new(),
        };

        let invisible = controller.fire_invisible_transitions();
        controller.changes = ChangeTracker::seeded(controller.enabled());

        info!(
            transitions = controller.transitions.len(),
            invisible_fired = invisible,
            tier = %controller.config.automation_tier(),
            "Step controller ready"
        );
        Ok(controller)
    }

    /// Change the cascade tier used by subsequent firings
    pub fn set_automation_tier(&mut self, tier: AutomationTier) {
        debug!(%tier, "Automation tier changed");
        self.config.set_automation_tier(tier);
    }

    /// Tier the next cascade starts from
    pub fn automation_tier(&self) -> AutomationTier {
        self.config.automation_tier()
    }

    /// Visible elements of all enabled transitions, in interpreter order
    pub fn fireable_elements(&self) -> Vec<&DiagramElement> {
        self.enabled()
            .iter()
            .filter_map(|id| self.transitions.get(id))
            .filter_map(|t| t.element(&self.diagram))
            .filter(|element| element.is_visible())
            .collect()
    }

    /// Whether `resource_id` names a currently enabled transition
    pub fn is_fireable(&self, resource_id: &str) -> bool {
        self.find_enabled(&self.enabled(), resource_id).is_some()
    }

    /// Fire the enabled transition whose element carries `resource_id`
    ///
    /// Fails with [`Error::NotFireable`] without touching any state if no
    /// enabled transition matches. Otherwise fires it, stabilizes invisible
    /// transitions, runs the automation cascade and records every change.
    pub fn fire_object(&mut self, resource_id: &str) -> Result<FireReport> {
        let before = self.enabled();
        let Some(target) = self.find_enabled(&before, resource_id) else {
            debug!(resource_id, "Rejected: not fireable");
            return Err(Error::NotFireable(resource_id.to_string()));
        };

        debug!(resource_id, transition = %target, "Firing");
        let mut report = FireReport::default();
        self.fire_transition(target);
        self.changes.record_transition(target);
        report.fired.push(target);

        report.invisible_fired += self.fire_invisible_transitions();
        self.run_cascade(&before, &mut report);

        let after = self.enabled();
        for id in after.difference(&before) {
            trace!(transition = %id, "Newly enabled");
            self.changes.record_transition(*id);
        }
        for id in before.difference(&after) {
            trace!(transition = %id, "No longer enabled");
            self.changes.record_transition(*id);
        }

        Ok(report)
    }

    /// Forget all recorded changes
    pub fn clear_changed_objects(&mut self) {
        self.changes.clear();
    }

    /// Recorded changes in wire order
    pub fn changed_records(&self) -> Vec<ChangeRecord> {
        let enabled = self.enabled();
        self.changes.records(&self.view(&enabled))
    }

    /// Recorded changes serialized as `<id>,<count>,<t|f>;` records
    ///
    /// Does not clear the tracker.
    pub fn changed_objects_as_string(&self) -> String {
        let enabled = self.enabled();
        self.changes.render(&self.view(&enabled))
    }

    /// Changes recorded since the last clear
    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    /// Current marking
    pub fn marking(&self) -> &I::Marking {
        &self.marking
    }

    /// Diagram the transitions are bound to
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Get a steppable transition by id
    pub fn transition(&self, id: TransitionId) -> Option<&SteppableTransition> {
        self.transitions.get(&id)
    }

    /// All steppable transitions, in interpreter order
    pub fn transitions(&self) -> impl Iterator<Item = &SteppableTransition> {
        self.transitions.values()
    }

    /// Execution count of the transition bound to `resource_id`
    pub fn times_executed(&self, resource_id: &str) -> Option<u64> {
        self.transitions
            .values()
            .find(|t| t.matches(&self.diagram, resource_id))
            .map(SteppableTransition::times_executed)
    }

    /// Currently enabled transitions, in interpreter order
    pub fn enabled(&self) -> IndexSet<TransitionId> {
        self.interpreter
            .enabled_transitions(&self.net, &self.marking)
            .into_iter()
            .collect()
    }

    fn view<'a>(&'a self, enabled: &'a IndexSet<TransitionId>) -> ChangeView<'a> {
        ChangeView {
            transitions: &self.transitions,
            diagram: &self.diagram,
            enabled,
        }
    }

    fn find_enabled(&self, enabled: &IndexSet<TransitionId>, resource_id: &str) -> Option<TransitionId> {
        enabled.iter().copied().find(|id| {
            self.transitions
                .get(id)
                .is_some_and(|t| t.matches(&self.diagram, resource_id))
        })
    }

    /// Apply the firing rule and count the firing
    fn step(&mut self, id: TransitionId) {
        self.marking = self.interpreter.fire(&self.net, &self.marking, id);
        if let Some(transition) = self.transitions.get_mut(&id) {
            transition.record_firing();
        }
    }

    /// Fire a visible transition, noting a decision gateway it branches from
    fn fire_transition(&mut self, id: TransitionId) {
        self.step(id);

        let gateway = self
            .transitions
            .get(&id)
            .and_then(|t| t.element)
            .and_then(|element| self.diagram.decision_source_of(element))
            .map(|gateway| gateway.id);
        if let Some(gateway) = gateway {
            trace!(transition = %id, %gateway, "Decision branch taken");
            self.changes.record_gateway(gateway);
        }
    }

    /// Fire the earliest enabled invisible transition until none is left
    fn fire_invisible_transitions(&mut self) -> usize {
        let mut fired = 0;
        while let Some(id) = self.next_invisible() {
            trace!(transition = %id, "Firing invisible transition");
            self.step(id);
            fired += 1;
        }
        fired
    }

    fn next_invisible(&self) -> Option<TransitionId> {
        self.interpreter
            .enabled_transitions(&self.net, &self.marking)
            .into_iter()
            .find(|id| {
                self.transitions
                    .get(id)
                    .is_some_and(|t| t.is_invisible(&self.diagram))
            })
    }

    /// Fire newly enabled transitions tier by tier
    ///
    /// Transitions enabled in `before` are never auto-fired, even if the
    /// cascade disables and re-enables them.
    fn run_cascade(&mut self, before: &IndexSet<TransitionId>, report: &mut FireReport) {
        for tier in self.config.automation_tier().cascade() {
            while let Some(id) = self.next_automatic(tier, before) {
                debug!(transition = %id, %tier, "Auto-firing");
                self.fire_transition(id);
                self.changes.record_transition(id);
                report.fired.push(id);
                report.invisible_fired += self.fire_invisible_transitions();
            }
        }
    }

    fn next_automatic(&self, tier: AutomationTier, before: &IndexSet<TransitionId>) -> Option<TransitionId> {
        self.interpreter
            .enabled_transitions(&self.net, &self.marking)
            .into_iter()
            .find(|id| {
                !before.contains(id)
                    && self.transitions.get(id).is_some_and(|t| t.tier == tier)
            })
    }
}
