//! Automation tiers
//!
//! Tiers are totally ordered from fully manual to fully automatic. The order
//! lives in [`AutomationTier::ALL`] rather than in the enum declaration, and
//! "less automatic" is a step down that array.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How eagerly an enabled transition is fired without user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AutomationTier {
    /// Never fired automatically
    #[default]
    Manual,
    /// Fired automatically when the controller runs at `SemiAuto` or above
    SemiAuto,
    /// Fired automatically only when the controller runs at `FullAuto`
    FullAuto,
}

impl AutomationTier {
    /// All tiers, least automatic first
    pub const ALL: [AutomationTier; 3] = [
        AutomationTier::Manual,
        AutomationTier::SemiAuto,
        AutomationTier::FullAuto,
    ];

    /// Position in [`Self::ALL`]
    pub fn level(self) -> usize {
        match self {
            AutomationTier::Manual => 0,
            AutomationTier::SemiAuto => 1,
            AutomationTier::FullAuto => 2,
        }
    }

    /// Look up a tier by its level
    pub fn from_level(level: usize) -> Option<Self> {
        Self::ALL.get(level).copied()
    }

    /// The fully manual tier
    pub fn is_manual(self) -> bool {
        self == AutomationTier::Manual
    }

    /// False only for the manual tier
    pub fn has_less_automatic_tier(self) -> bool {
        self.level() > 0
    }

    /// The next less automatic tier, `None` for the manual tier
    pub fn less_automatic_tier(self) -> Option<Self> {
        self.level().checked_sub(1).and_then(Self::from_level)
    }

    /// Tiers auto-fired by a controller configured at `self`
    ///
    /// Walks from `self` down to, but excluding, [`AutomationTier::Manual`].
    pub fn cascade(self) -> impl Iterator<Item = AutomationTier> {
        std::iter::successors(Some(self), |tier| tier.less_automatic_tier())
            .take_while(|tier| !tier.is_manual())
    }
}

impl PartialOrd for AutomationTier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AutomationTier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.level().cmp(&other.level())
    }
}

impl fmt::Display for AutomationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AutomationTier::Manual => "manual",
            AutomationTier::SemiAuto => "semi-auto",
            AutomationTier::FullAuto => "full-auto",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_follow_all() {
        for (i, tier) in AutomationTier::ALL.iter().enumerate() {
            assert_eq!(tier.level(), i);
            assert_eq!(AutomationTier::from_level(i), Some(*tier));
        }
        assert_eq!(AutomationTier::from_level(3), None);
    }

    #[test]
    fn test_less_automatic_tier() {
        assert!(!AutomationTier::Manual.has_less_automatic_tier());
        assert_eq!(AutomationTier::Manual.less_automatic_tier(), None);

        assert!(AutomationTier::FullAuto.has_less_automatic_tier());
        assert_eq!(
            AutomationTier::FullAuto.less_automatic_tier(),
            Some(AutomationTier::SemiAuto)
        );
        assert_eq!(
            AutomationTier::SemiAuto.less_automatic_tier(),
            Some(AutomationTier::Manual)
        );
    }

    #[test]
    fn test_ordering() {
        assert!(AutomationTier::Manual < AutomationTier::SemiAuto);
        assert!(AutomationTier::SemiAuto < AutomationTier::FullAuto);
        assert_eq!(AutomationTier::default(), AutomationTier::Manual);
    }

    #[test]
    fn test_cascade_excludes_manual() {
        let tiers: Vec<_> = AutomationTier::FullAuto.cascade().collect();
        assert_eq!(tiers, vec![AutomationTier::FullAuto, AutomationTier::SemiAuto]);

        let tiers: Vec<_> = AutomationTier::SemiAuto.cascade().collect();
        assert_eq!(tiers, vec![AutomationTier::SemiAuto]);

        assert_eq!(AutomationTier::Manual.cascade().count(), 0);
    }
}
