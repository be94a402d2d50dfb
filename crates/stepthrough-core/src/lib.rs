//! Stepthrough Core - step-through execution of token-based process models
//!
//! This crate lets a caller walk a process model one visible action at a time:
//! - Automation tiers (`AutomationTier`) deciding what fires without user input
//! - Transitions bound to diagram elements (`SteppableTransition`, `Diagram`)
//! - The `StepController`, which fires elements by resource identifier,
//!   stabilizes invisible transitions and runs the automation cascade
//! - A `ChangeTracker` recording what changed since the last flush, in a
//!   compact wire format for incremental UI refresh
//!
//! ## Collaborators
//!
//! The controller does not know the firing rule. It asks an [`Interpreter`]
//! for the initial marking, the enabled transitions and the result of a
//! firing. [`PlaceTransitionInterpreter`] implements the standard rule for
//! weighted place/transition nets.
//!
//! ## JSON Feature
//!
//! Enable the `serde_json` feature to export change records as JSON:
//! ```toml
//! stepthrough-core = { version = "0.1", features = ["serde_json"] }
//! ```

pub mod changes;
mod config;
pub mod controller;
mod diagram;
mod error;
mod identity;
mod interpreter;
pub mod net;
mod tier;
mod transition;

pub use changes::{ChangeRecord, ChangeTracker, GATEWAY_TIMES_EXECUTED};
pub use config::StepConfig;
pub use controller::{FireReport, StepController};
pub use diagram::{Diagram, DiagramElement, ElementKind};
pub use error::{Error, Result};
pub use identity::{ElementId, PlaceId, ResourceId, TransitionId};
pub use interpreter::Interpreter;
pub use net::{Marking, PlaceTransitionInterpreter, PlaceTransitionNet};
pub use tier::AutomationTier;
pub use transition::SteppableTransition;

#[cfg(feature = "serde_json")]
pub use changes::records_to_json;
