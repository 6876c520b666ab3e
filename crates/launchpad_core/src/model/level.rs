//! Three-step rating scale shared by risk and stakeholder assessments.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Qualitative rating used for risk probability/impact and stakeholder
/// influence/interest.
///
/// Ordering is semantic (`Low < Medium < High`) so matrix buckets keyed by
/// level pairs iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// All levels in ascending order. Used to pre-seed matrix buckets.
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    /// Numeric weight for score products: Low=1, Medium=2, High=3.
    pub fn weight(self) -> u8 {
        match self {
            Level::Low => 1,
            Level::Medium => 2,
            Level::High => 3,
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::Level;

    #[test]
    fn weights_are_one_two_three() {
        assert_eq!(Level::Low.weight(), 1);
        assert_eq!(Level::Medium.weight(), 2);
        assert_eq!(Level::High.weight(), 3);
    }

    #[test]
    fn ordering_is_low_to_high() {
        assert!(Level::Low < Level::Medium);
        assert!(Level::Medium < Level::High);
    }
}
