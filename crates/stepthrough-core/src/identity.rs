//! Identity types for net nodes and diagram elements

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense index newtype, displayed as `<label>:<index>`
macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub usize);

        impl $name {
            pub fn new(index: usize) -> Self {
                Self(index)
            }

            pub fn raw(&self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, ":{}"), self.0)
            }
        }
    };
}

index_id!(
    /// Index of a transition in the underlying net
    TransitionId,
    "transition"
);
index_id!(
    /// Index of a place in the underlying net
    PlaceId,
    "place"
);
index_id!(
    /// Handle of an element in the diagram store
    ElementId,
    "element"
);

/// Stable identifier of a visible diagram element
///
/// This is the identifier the UI knows the element by and the one passed to
/// [`StepController::fire_object`](crate::StepController::fire_object).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_ids() {
        let id = TransitionId::new(3);
        assert_eq!(id.raw(), 3);
        assert_eq!(format!("{}", id), "transition:3");
        assert_eq!(format!("{}", PlaceId::new(0)), "place:0");
        assert_eq!(format!("{}", ElementId::new(7)), "element:7");
    }

    #[test]
    fn test_transition_ids_order_by_index() {
        assert!(TransitionId::new(1) < TransitionId::new(2));
    }

    #[test]
    fn test_resource_id() {
        let id = ResourceId::from("sid-42");
        assert_eq!(id.as_str(), "sid-42");
        assert_eq!(format!("{}", id), "sid-42");
    }
}
