//! Risk register: scored entries plus matrix and ranking views.

use crate::model::level::Level;
use crate::model::risk::{risk_score, NewRisk, Risk, RiskStatus};
use chrono::Utc;
use log::{info, warn};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Probability/impact bucket mapping. Every one of the nine buckets is
/// present even when empty so grid rendering never special-cases gaps.
pub type RiskMatrix = BTreeMap<(Level, Level), Vec<Risk>>;

/// Append-only risk register with derived scores.
#[derive(Debug, Default)]
pub struct RiskRegistry {
    risks: Vec<Risk>,
}

impl RiskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }

    /// Registers one risk. The score is derived from probability and
    /// impact; the entry starts [`RiskStatus::Open`].
    pub fn add_risk(&mut self, input: NewRisk) -> Risk {
        let risk = Risk {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            category: input.category,
            probability: input.probability,
            impact: input.impact,
            risk_score: risk_score(input.probability, input.impact),
            mitigation: input.mitigation,
            owner: input.owner,
            status: RiskStatus::Open,
            created_date: Utc::now(),
        };
        info!(
            "event=risk_add module=registry status=ok score={} category={}",
            risk.risk_score, risk.category
        );
        self.risks.push(risk.clone());
        risk
    }

    /// Moves one risk to a new lifecycle state. An unknown id is a logged
    /// no-op, not an error.
    pub fn update_status(&mut self, id: Uuid, status: RiskStatus) -> bool {
        match self.risks.iter_mut().find(|risk| risk.id == id) {
            Some(risk) => {
                risk.status = status;
                true
            }
            None => {
                warn!(
                    "event=risk_update module=registry status=noop error_code=unknown_id id={id}"
                );
                false
            }
        }
    }

    /// Buckets every risk by its (probability, impact) pair. All nine
    /// buckets are pre-seeded.
    pub fn matrix(&self) -> RiskMatrix {
        let mut matrix = RiskMatrix::new();
        for probability in Level::ALL {
            for impact in Level::ALL {
                matrix.insert((probability, impact), Vec::new());
            }
        }
        for risk in &self.risks {
            if let Some(bucket) = matrix.get_mut(&(risk.probability, risk.impact)) {
                bucket.push(risk.clone());
            }
        }
        matrix
    }

    /// The `count` highest-scored open risks, descending. Mitigated and
    /// closed entries never rank. Ties keep insertion order.
    pub fn top_risks(&self, count: usize) -> Vec<&Risk> {
        let mut ranked: Vec<&Risk> = self
            .risks
            .iter()
            .filter(|risk| risk.status == RiskStatus::Open)
            .collect();
        ranked.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
        ranked.truncate(count);
        ranked
    }

    /// Open entries only, in insertion order.
    pub fn open_risks(&self) -> Vec<&Risk> {
        self.risks
            .iter()
            .filter(|risk| risk.status == RiskStatus::Open)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::risk::RiskCategory;

    fn risk(title: &str, probability: Level, impact: Level) -> NewRisk {
        NewRisk {
            title: title.to_string(),
            description: String::new(),
            category: RiskCategory::Technical,
            probability,
            impact,
            mitigation: String::new(),
            owner: String::new(),
        }
    }

    #[test]
    fn add_derives_score_and_opens() {
        let mut registry = RiskRegistry::new();
        let added = registry.add_risk(risk("flaky vendor api", Level::Medium, Level::High));
        assert_eq!(added.risk_score, 6);
        assert_eq!(added.status, RiskStatus::Open);
    }

    #[test]
    fn matrix_has_all_nine_buckets() {
        let mut registry = RiskRegistry::new();
        let added = registry.add_risk(risk("scope creep", Level::High, Level::High));

        let matrix = registry.matrix();
        assert_eq!(matrix.len(), 9);
        assert_eq!(matrix[&(Level::High, Level::High)].len(), 1);
        assert_eq!(matrix[&(Level::High, Level::High)][0].id, added.id);
        assert!(matrix[&(Level::Low, Level::Low)].is_empty());
    }

    #[test]
    fn top_risks_sorts_descending_and_keeps_tie_order() {
        let mut registry = RiskRegistry::new();
        let low = registry.add_risk(risk("minor", Level::Low, Level::Low));
        let first_nine = registry.add_risk(risk("first critical", Level::High, Level::High));
        let second_nine = registry.add_risk(risk("second critical", Level::High, Level::High));

        let top = registry.top_risks(2);
        assert_eq!(top[0].id, first_nine.id);
        assert_eq!(top[1].id, second_nine.id);

        let all = registry.top_risks(10);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].id, low.id);
    }

    #[test]
    fn closed_and_mitigated_risks_never_rank() {
        let mut registry = RiskRegistry::new();
        let closed = registry.add_risk(risk("closed critical", Level::High, Level::High));
        registry.update_status(closed.id, RiskStatus::Closed);
        let mitigated = registry.add_risk(risk("handled", Level::High, Level::Medium));
        registry.update_status(mitigated.id, RiskStatus::Mitigated);
        let open = registry.add_risk(risk("open minor", Level::Low, Level::Low));

        let top = registry.top_risks(3);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, open.id);
    }

    #[test]
    fn unknown_id_update_is_a_noop() {
        let mut registry = RiskRegistry::new();
        registry.add_risk(risk("known", Level::Low, Level::High));

        assert!(!registry.update_status(Uuid::new_v4(), RiskStatus::Closed));
        assert_eq!(registry.open_risks().len(), 1);
    }
}
