//! Place/transition nets and their standard firing rule
//!
//! A small reference [`Interpreter`] so a controller can run without an
//! external engine. Arcs are weighted; a transition is enabled when every
//! input place holds at least the arc weight in tokens.

use crate::{Error, Interpreter, PlaceId, Result, TransitionId};
use serde::{Deserialize, Serialize};

/// A place with its initial token count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Human-readable name
    pub name: String,
    /// Tokens in the initial marking
    pub initial_tokens: u32,
}

/// A transition with weighted input and output arcs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetTransition {
    /// Human-readable name
    pub name: String,
    /// Tokens consumed per place
    pub inputs: Vec<(PlaceId, u32)>,
    /// Tokens produced per place
    pub outputs: Vec<(PlaceId, u32)>,
}

/// Static place/transition net
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceTransitionNet {
    places: Vec<Place>,
    transitions: Vec<NetTransition>,
}

impl PlaceTransitionNet {
    /// Create an empty net
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place holding `initial_tokens` in the initial marking
    pub fn add_place(&mut self, name: impl Into<String>, initial_tokens: u32) -> PlaceId {
        let id = PlaceId::new(self.places.len());
        self.places.push(Place {
            name: name.into(),
            initial_tokens,
        });
        id
    }

    /// Add a transition without arcs
    pub fn add_transition(&mut self, name: impl Into<String>) -> TransitionId {
        let id = TransitionId::new(self.transitions.len());
        self.transitions.push(NetTransition {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        });
        id
    }

    /// Add an arc from `place` into `transition`
    pub fn input(&mut self, place: PlaceId, transition: TransitionId, weight: u32) -> Result<()> {
        self.check_place(place)?;
        self.transition_mut(transition)?
            .inputs
            .push((place, weight));
        Ok(())
    }

    /// Add an arc from `transition` into `place`
    pub fn output(&mut self, transition: TransitionId, place: PlaceId, weight: u32) -> Result<()> {
        self.check_place(place)?;
        self.transition_mut(transition)?
            .outputs
            .push((place, weight));
        Ok(())
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(id.raw())
    }

    pub fn transition(&self, id: TransitionId) -> Option<&NetTransition> {
        self.transitions.get(id.raw())
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// The declared initial marking
    pub fn initial_marking(&self) -> Marking {
        Marking {
            tokens: self.places.iter().map(|p| p.initial_tokens).collect(),
        }
    }

    fn check_place(&self, place: PlaceId) -> Result<()> {
        if place.raw() < self.places.len() {
            Ok(())
        } else {
            Err(Error::UnknownPlace(place))
        }
    }

    fn transition_mut(&mut self, id: TransitionId) -> Result<&mut NetTransition> {
        self.transitions
            .get_mut(id.raw())
            .ok_or(Error::UnknownTransition(id))
    }
}

/// Token counts per place
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marking {
    tokens: Vec<u32>,
}

impl Marking {
    /// Create a marking from raw per-place counts
    pub fn from_tokens(tokens: Vec<u32>) -> Self {
        Self { tokens }
    }

    /// Tokens on `place` (zero for unknown places)
    pub fn tokens(&self, place: PlaceId) -> u32 {
        self.tokens.get(place.raw()).copied().unwrap_or(0)
    }

    /// Total tokens over all places
    pub fn total(&self) -> u64 {
        self.tokens.iter().map(|&t| u64::from(t)).sum()
    }

    fn covers(&self, arcs: &[(PlaceId, u32)]) -> bool {
        arcs.iter().all(|&(place, weight)| self.tokens(place) >= weight)
    }
}

/// Standard firing rule for [`PlaceTransitionNet`]
///
/// Enabled transitions are reported in ascending [`TransitionId`] order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceTransitionInterpreter;

impl PlaceTransitionInterpreter {
    pub fn new() -> Self {
        Self
    }
}

impl Interpreter for PlaceTransitionInterpreter {
    type Net = PlaceTransitionNet;
    type Marking = Marking;

    fn initial_marking(&self, net: &PlaceTransitionNet) -> Marking {
        net.initial_marking()
    }

    fn enabled_transitions(&self, net: &PlaceTransitionNet, marking: &Marking) -> Vec<TransitionId> {
        net.transitions
            .iter()
            .enumerate()
            .filter(|(_, t)| marking.covers(&t.inputs))
            .map(|(i, _)| TransitionId::new(i))
            .collect()
    }

    fn fire(&self, net: &PlaceTransitionNet, marking: &Marking, transition: TransitionId) -> Marking {
        let mut next = marking.clone();
        let Some(t) = net.transition(transition) else {
            return next;
        };

        // Callers only fire enabled transitions; saturate rather than wrap otherwise
        for &(place, weight) in &t.inputs {
            if let Some(slot) = next.tokens.get_mut(place.raw()) {
                *slot = slot.saturating_sub(weight);
            }
        }
        for &(place, weight) in &t.outputs {
            if let Some(slot) = next.tokens.get_mut(place.raw()) {
                *slot = slot.saturating_add(weight);
            }
        }
        next
    }

    fn transitions(&self, net: &PlaceTransitionNet) -> Vec<TransitionId> {
        (0..net.transition_count()).map(TransitionId::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (PlaceTransitionNet, TransitionId, TransitionId) {
        let mut net = PlaceTransitionNet::new();
        let p0 = net.add_place("p0", 1);
        let p1 = net.add_place("p1", 0);
        let p2 = net.add_place("p2", 0);
        let a = net.add_transition("a");
        let b = net.add_transition("b");
        net.input(p0, a, 1).unwrap();
        net.output(a, p1, 1).unwrap();
        net.input(p1, b, 1).unwrap();
        net.output(b, p2, 1).unwrap();
        (net, a, b)
    }

    #[test]
    fn test_enabled_and_fire() {
        let (net, a, b) = chain();
        let interp = PlaceTransitionInterpreter::new();
        let m0 = interp.initial_marking(&net);
        assert_eq!(interp.enabled_transitions(&net, &m0), vec![a]);

        let m1 = interp.fire(&net, &m0, a);
        assert_eq!(interp.enabled_transitions(&net, &m1), vec![b]);
        assert_eq!(m1.tokens(PlaceId::new(1)), 1);
        // Firing yields a new value; the old marking is untouched
        assert_eq!(m0.tokens(PlaceId::new(0)), 1);
        assert_eq!(m0.total(), m1.total());
    }

    #[test]
    fn test_weighted_arcs() {
        let mut net = PlaceTransitionNet::new();
        let p = net.add_place("p", 1);
        let t = net.add_transition("t");
        net.input(p, t, 2).unwrap();

        let interp = PlaceTransitionInterpreter::new();
        let m = interp.initial_marking(&net);
        assert!(interp.enabled_transitions(&net, &m).is_empty());

        let m = Marking::from_tokens(vec![2]);
        assert_eq!(interp.enabled_transitions(&net, &m), vec![t]);
        assert_eq!(interp.fire(&net, &m, t).total(), 0);
    }

    #[test]
    fn test_transition_without_inputs_always_enabled() {
        let mut net = PlaceTransitionNet::new();
        let t = net.add_transition("source");
        let interp = PlaceTransitionInterpreter::new();
        let m = interp.initial_marking(&net);
        assert_eq!(interp.enabled_transitions(&net, &m), vec![t]);
    }

    #[test]
    fn test_arc_validation() {
        let mut net = PlaceTransitionNet::new();
        let t = net.add_transition("t");
        assert_eq!(
            net.input(PlaceId::new(4), t, 1),
            Err(Error::UnknownPlace(PlaceId::new(4)))
        );
        let p = net.add_place("p", 0);
        assert_eq!(
            net.output(TransitionId::new(9), p, 1),
            Err(Error::UnknownTransition(TransitionId::new(9)))
        );
    }
}
