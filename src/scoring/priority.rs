use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority level.
///
/// Levels 1..=5 scale the point score linearly. Any other level is not an
/// error by default: it simply leaves the score unscaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    VeryLow,
    Low,
    #[default]
    Normal,
    High,
    VeryHigh,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::VeryLow,
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::VeryHigh,
    ];

    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Priority::VeryLow),
            2 => Some(Priority::Low),
            3 => Some(Priority::Normal),
            4 => Some(Priority::High),
            5 => Some(Priority::VeryHigh),
            _ => None,
        }
    }

    pub fn level(&self) -> i64 {
        match self {
            Priority::VeryLow => 1,
            Priority::Low => 2,
            Priority::Normal => 3,
            Priority::High => 4,
            Priority::VeryHigh => 5,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Priority::VeryLow => 0.5,
            Priority::Low => 0.75,
            Priority::Normal => 1.0,
            Priority::High => 1.25,
            Priority::VeryHigh => 1.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::VeryLow => "very low",
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::VeryHigh => "very high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.level(), self.label())
    }
}

/// Multiplier for a raw priority level. Unknown levels leave the score as is.
pub fn multiplier_for_level(level: i64) -> f64 {
    Priority::from_level(level).map_or(1.0, |p| p.multiplier())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_table() {
        assert_eq!(multiplier_for_level(1), 0.5);
        assert_eq!(multiplier_for_level(2), 0.75);
        assert_eq!(multiplier_for_level(3), 1.0);
        assert_eq!(multiplier_for_level(4), 1.25);
        assert_eq!(multiplier_for_level(5), 1.5);
    }

    #[test]
    fn test_unknown_levels_are_neutral() {
        assert_eq!(multiplier_for_level(0), 1.0);
        assert_eq!(multiplier_for_level(6), 1.0);
        assert_eq!(multiplier_for_level(99), 1.0);
        assert_eq!(multiplier_for_level(-1), 1.0);
        assert_eq!(multiplier_for_level(300), 1.0);
    }

    #[test]
    fn test_level_roundtrip() {
        for priority in Priority::ALL {
            assert_eq!(Priority::from_level(priority.level()), Some(priority));
        }
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Priority::default(), Priority::Normal);
        assert_eq!(Priority::default().level(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Priority::VeryHigh.to_string(), "5 (very high)");
    }
}
