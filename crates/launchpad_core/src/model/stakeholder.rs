//! Stakeholder register records, engagement classification and the
//! communication log.
//!
//! # Invariants
//! - `engagement_strategy` is derived from influence and interest at
//!   insertion time via [`engagement_strategy`].
//! - Communication entries reference stakeholders by id for lookup only;
//!   the log is owned by the registry, not by the stakeholder.

use crate::model::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Fixed stakeholder type set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeholderType {
    Internal,
    External,
    Customer,
    Vendor,
    Regulatory,
}

/// Engagement classification derived from influence and interest.
///
/// This is a deliberately coarse mapping, not a full 3x3 power/interest
/// grid: any Medium on either axis lands in `Monitor`. Medium-High is
/// `Monitor`, not `KeepInformed`. Preserved as-is from the source behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementStrategy {
    ManageClosely,
    KeepSatisfied,
    KeepInformed,
    Monitor,
}

impl Display for EngagementStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EngagementStrategy::ManageClosely => "Manage Closely",
            EngagementStrategy::KeepSatisfied => "Keep Satisfied",
            EngagementStrategy::KeepInformed => "Keep Informed",
            EngagementStrategy::Monitor => "Monitor",
        };
        write!(f, "{label}")
    }
}

/// Classifies one influence/interest pair.
pub fn engagement_strategy(influence: Level, interest: Level) -> EngagementStrategy {
    match (influence, interest) {
        (Level::High, Level::High) => EngagementStrategy::ManageClosely,
        (Level::High, Level::Low) => EngagementStrategy::KeepSatisfied,
        (Level::Low, Level::High) => EngagementStrategy::KeepInformed,
        _ => EngagementStrategy::Monitor,
    }
}

/// One entry in the stakeholder register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stakeholder {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub organization: String,
    #[serde(rename = "type")]
    pub kind: StakeholderType,
    pub influence: Level,
    pub interest: Level,
    pub contact: String,
    pub communication_preference: String,
    pub expectations: String,
    pub concerns: String,
    pub engagement_strategy: EngagementStrategy,
    pub last_contact: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
}

/// User input for registering one stakeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStakeholder {
    pub name: String,
    pub role: String,
    pub organization: String,
    pub kind: StakeholderType,
    pub influence: Level,
    pub interest: Level,
    pub contact: String,
    /// Defaults to "Email" when empty.
    pub communication_preference: String,
    pub expectations: String,
    pub concerns: String,
}

/// One communication log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationEntry {
    pub id: Uuid,
    /// Back-reference to a stakeholder id. Lookup only, not ownership.
    pub stakeholder_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub subject: String,
    pub summary: String,
    pub date: DateTime<Utc>,
    pub follow_up_required: bool,
    pub follow_up_date: Option<DateTime<Utc>>,
}

/// User input for one communication log entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCommunication {
    pub kind: String,
    pub subject: String,
    pub summary: String,
    pub follow_up_required: bool,
    pub follow_up_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::{engagement_strategy, EngagementStrategy};
    use crate::model::level::Level;

    #[test]
    fn corner_pairs_map_to_named_strategies() {
        assert_eq!(
            engagement_strategy(Level::High, Level::High),
            EngagementStrategy::ManageClosely
        );
        assert_eq!(
            engagement_strategy(Level::High, Level::Low),
            EngagementStrategy::KeepSatisfied
        );
        assert_eq!(
            engagement_strategy(Level::Low, Level::High),
            EngagementStrategy::KeepInformed
        );
    }

    #[test]
    fn any_medium_maps_to_monitor() {
        // Coarse classification: Medium-High is Monitor, not KeepInformed.
        assert_eq!(
            engagement_strategy(Level::Medium, Level::High),
            EngagementStrategy::Monitor
        );
        assert_eq!(
            engagement_strategy(Level::Medium, Level::Low),
            EngagementStrategy::Monitor
        );
        assert_eq!(
            engagement_strategy(Level::High, Level::Medium),
            EngagementStrategy::Monitor
        );
        assert_eq!(
            engagement_strategy(Level::Low, Level::Low),
            EngagementStrategy::Monitor
        );
    }
}
