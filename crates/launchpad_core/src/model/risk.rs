//! Risk register records and score derivation.
//!
//! # Invariants
//! - `risk_score` is always the product of the probability and impact
//!   weights; valid values are {1, 2, 3, 4, 6, 9}.
//! - New risks start with status [`RiskStatus::Open`].

use crate::model::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Fixed risk category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Technical,
    Financial,
    Schedule,
    Resource,
    External,
}

impl Display for RiskCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskCategory::Technical => "Technical",
            RiskCategory::Financial => "Financial",
            RiskCategory::Schedule => "Schedule",
            RiskCategory::Resource => "Resource",
            RiskCategory::External => "External",
        };
        write!(f, "{label}")
    }
}

/// Risk lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskStatus {
    Open,
    Mitigated,
    Closed,
}

/// One entry in the risk register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: RiskCategory,
    pub probability: Level,
    pub impact: Level,
    /// Derived probability-weight times impact-weight, range 1..=9.
    pub risk_score: u8,
    pub mitigation: String,
    /// Free-form team member name, empty when unowned. String match only.
    pub owner: String,
    pub status: RiskStatus,
    pub created_date: DateTime<Utc>,
}

/// User input for registering one risk.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRisk {
    pub title: String,
    pub description: String,
    pub category: RiskCategory,
    pub probability: Level,
    pub impact: Level,
    pub mitigation: String,
    pub owner: String,
}

/// Score product for one probability/impact pair.
pub fn risk_score(probability: Level, impact: Level) -> u8 {
    probability.weight() * impact.weight()
}

#[cfg(test)]
mod tests {
    use super::risk_score;
    use crate::model::level::Level;

    #[test]
    fn score_is_weight_product() {
        assert_eq!(risk_score(Level::High, Level::High), 9);
        assert_eq!(risk_score(Level::Low, Level::Medium), 2);
        assert_eq!(risk_score(Level::Medium, Level::High), 6);
        assert_eq!(risk_score(Level::Low, Level::Low), 1);
    }
}
