//! Controller configuration

use crate::AutomationTier;
use serde::{Deserialize, Serialize};

/// Configuration for a [`StepController`](crate::StepController)
///
/// # Example
///
/// ```
/// use stepthrough_core::{AutomationTier, StepConfig};
///
/// let config = StepConfig::default();
/// assert_eq!(config.automation_tier(), AutomationTier::SemiAuto);
///
/// let config = StepConfig::with_automation_tier(AutomationTier::Manual);
/// assert!(!config.auto_fires());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Highest tier the automation cascade fires
    ///
    /// Every tier from this one down to, but excluding, `Manual` is fired
    /// automatically after a user action.
    automation_tier: AutomationTier,
}

impl StepConfig {
    /// Create a configuration running the cascade from `tier`
    pub fn with_automation_tier(tier: AutomationTier) -> Self {
        Self {
            automation_tier: tier,
        }
    }

    pub fn automation_tier(&self) -> AutomationTier {
        self.automation_tier
    }

    /// Change the cascade tier
    pub fn set_automation_tier(&mut self, tier: AutomationTier) {
        self.automation_tier = tier;
    }

    /// Whether any transition can be fired without an explicit request
    pub fn auto_fires(&self) -> bool {
        !self.automation_tier.is_manual()
    }
}

impl Default for StepConfig {
    /// Semi-automatic cascade
    fn default() -> Self {
        Self {
            automation_tier: AutomationTier::SemiAuto,
        }
    }
}
