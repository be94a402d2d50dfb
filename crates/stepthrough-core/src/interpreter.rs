//! Interpreter trait - the firing rule the controller delegates to
//!
//! The controller never decides which transitions are structurally enabled.
//! It asks an `Interpreter` and only keeps the resulting marking.

use crate::TransitionId;

/// Static net semantics consumed by [`StepController`](crate::StepController)
///
/// Implementations must report enabled transitions in a stable order: the
/// controller's tie-breaks always pick the earliest eligible entry.
pub trait Interpreter {
    /// Static net structure
    type Net;

    /// Token distribution over the net's places
    ///
    /// Treated as an opaque value; the controller replaces it wholesale on
    /// every firing.
    type Marking: Clone;

    /// The net's declared initial marking
    fn initial_marking(&self, net: &Self::Net) -> Self::Marking;

    /// Transitions enabled in `marking`, in a stable order
    fn enabled_transitions(&self, net: &Self::Net, marking: &Self::Marking) -> Vec<TransitionId>;

    /// Marking reached by firing `transition` in `marking`
    ///
    /// Only called with transitions reported as enabled in `marking`.
    fn fire(
        &self,
        net: &Self::Net,
        marking: &Self::Marking,
        transition: TransitionId,
    ) -> Self::Marking;

    /// Every transition the net declares
    ///
    /// Used to check that each one has a steppable binding.
    fn transitions(&self, net: &Self::Net) -> Vec<TransitionId>;
}
