//! Stakeholder register and communication log.

use crate::model::level::Level;
use crate::model::stakeholder::{
    engagement_strategy, CommunicationEntry, NewCommunication, NewStakeholder, Stakeholder,
};
use chrono::{Duration, Utc};
use log::{info, warn};
use std::collections::BTreeMap;
use uuid::Uuid;

const DEFAULT_COMMUNICATION_PREFERENCE: &str = "Email";

/// Influence/interest bucket mapping, pre-seeded with all nine buckets.
pub type StakeholderMatrix = BTreeMap<(Level, Level), Vec<Stakeholder>>;

/// Stakeholder entries plus the append-only communication log.
///
/// Log entries reference stakeholders by id for lookup only; an entry
/// against an unknown id still lands in the log.
#[derive(Debug, Default)]
pub struct StakeholderRegistry {
    stakeholders: Vec<Stakeholder>,
    communications: Vec<CommunicationEntry>,
}

impl StakeholderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stakeholders(&self) -> &[Stakeholder] {
        &self.stakeholders
    }

    pub fn communications(&self) -> &[CommunicationEntry] {
        &self.communications
    }

    /// Registers one stakeholder with a derived engagement strategy. An
    /// empty communication preference defaults to `Email`.
    pub fn add_stakeholder(&mut self, input: NewStakeholder) -> Stakeholder {
        let communication_preference = if input.communication_preference.is_empty() {
            DEFAULT_COMMUNICATION_PREFERENCE.to_string()
        } else {
            input.communication_preference
        };
        let stakeholder = Stakeholder {
            id: Uuid::new_v4(),
            name: input.name,
            role: input.role,
            organization: input.organization,
            kind: input.kind,
            influence: input.influence,
            interest: input.interest,
            contact: input.contact,
            communication_preference,
            expectations: input.expectations,
            concerns: input.concerns,
            engagement_strategy: engagement_strategy(input.influence, input.interest),
            last_contact: None,
            created_date: Utc::now(),
        };
        info!(
            "event=stakeholder_add module=registry status=ok strategy={}",
            stakeholder.engagement_strategy
        );
        self.stakeholders.push(stakeholder.clone());
        stakeholder
    }

    /// Appends one communication log entry, dated now.
    ///
    /// When `stakeholder_id` resolves, that stakeholder's `last_contact`
    /// moves to the entry date; an unknown id keeps the entry but skips the
    /// update.
    pub fn log_communication(
        &mut self,
        stakeholder_id: Uuid,
        input: NewCommunication,
    ) -> CommunicationEntry {
        let entry = CommunicationEntry {
            id: Uuid::new_v4(),
            stakeholder_id,
            kind: input.kind,
            subject: input.subject,
            summary: input.summary,
            date: Utc::now(),
            follow_up_required: input.follow_up_required,
            follow_up_date: input.follow_up_date,
        };

        match self
            .stakeholders
            .iter_mut()
            .find(|stakeholder| stakeholder.id == stakeholder_id)
        {
            Some(stakeholder) => stakeholder.last_contact = Some(entry.date),
            None => {
                warn!(
                    "event=communication_log module=registry status=unmatched stakeholder_id={stakeholder_id}"
                );
            }
        }

        self.communications.push(entry.clone());
        entry
    }

    /// Log entries for one stakeholder, in insertion order.
    pub fn communications_for(&self, stakeholder_id: Uuid) -> Vec<&CommunicationEntry> {
        self.communications
            .iter()
            .filter(|entry| entry.stakeholder_id == stakeholder_id)
            .collect()
    }

    /// Buckets every stakeholder by its (influence, interest) pair. All
    /// nine buckets are pre-seeded.
    pub fn matrix(&self) -> StakeholderMatrix {
        let mut matrix = StakeholderMatrix::new();
        for influence in Level::ALL {
            for interest in Level::ALL {
                matrix.insert((influence, interest), Vec::new());
            }
        }
        for stakeholder in &self.stakeholders {
            if let Some(bucket) = matrix.get_mut(&(stakeholder.influence, stakeholder.interest)) {
                bucket.push(stakeholder.clone());
            }
        }
        matrix
    }

    /// Stakeholders due for outreach: never contacted at all, or whose last
    /// contact is more than `days` days ago.
    pub fn overdue_communications(&self, days: i64) -> Vec<&Stakeholder> {
        let cutoff = Utc::now() - Duration::days(days);
        self.stakeholders
            .iter()
            .filter(|stakeholder| {
                stakeholder
                    .last_contact
                    .map_or(true, |last| last < cutoff)
            })
            .collect()
    }
}
