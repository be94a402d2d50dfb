//! Stepthrough Script - RON loader for process definitions
//!
//! Loads process models from RON files:
//! - Places with initial tokens
//! - Diagram elements (nodes, gateways, composites, edges)
//! - Transitions with arcs, element bindings and automation tiers
//! - Controller configuration

mod error;
mod loader;
mod process;
mod schema;

pub use error::{Error, Result};
pub use loader::{Loader, ProcessLibrary};
pub use process::Process;
pub use schema::{ElementDef, ElementKindDef, PlaceDef, ProcessDef, TransitionDef};
