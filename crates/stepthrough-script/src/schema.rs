//! Schema of RON process definitions
//!
//! Places, elements and transitions refer to each other by file-local names.
//! Edges must be declared after both of their endpoints.

use serde::{Deserialize, Serialize};
use stepthrough_core::{AutomationTier, StepConfig};

/// A complete process definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessDef {
    /// Controller configuration
    #[serde(default)]
    pub config: StepConfig,
    /// Net places
    #[serde(default)]
    pub places: Vec<PlaceDef>,
    /// Diagram elements
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    /// Net transitions and their bindings
    #[serde(default)]
    pub transitions: Vec<TransitionDef>,
}

/// A place and its initial tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDef {
    pub name: String,
    #[serde(default)]
    pub tokens: u32,
}

/// A diagram element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDef {
    pub name: String,
    /// Visible identifier; omit for hidden elements
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub kind: ElementKindDef,
}

/// Element kind with names in place of element handles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum ElementKindDef {
    #[default]
    Node,
    DecisionGateway,
    Gateway,
    Composite { children: Vec<String> },
    Edge { source: String, target: String },
}

/// A transition with its arcs and diagram binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionDef {
    pub name: String,
    /// Bound element; omit for invisible transitions
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub tier: AutomationTier,
    /// `(place, weight)` pairs consumed on firing
    #[serde(default)]
    pub inputs: Vec<(String, u32)>,
    /// `(place, weight)` pairs produced on firing
    #[serde(default)]
    pub outputs: Vec<(String, u32)>,
}
