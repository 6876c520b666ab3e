//! Task, timeline and progress-overlay records.
//!
//! # Responsibility
//! - Mirror the CSV-sourced task/timeline shapes used by the UI layer.
//! - Define the persisted per-task progress overlay and its patch semantics.
//!
//! # Invariants
//! - `Task.completed` is never sourced from CSV; it always starts `false`
//!   and only the progress overlay can raise it.
//! - `time_spent_secs` is cumulative and stored in whole seconds everywhere
//!   (timer, sidecar, export).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One task row from `Task List.csv` plus locally tracked mutable state.
///
/// Identity is the externally supplied `UUID` column; the reconciliation
/// merge is a left join keyed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable external key (`UUID` column). Unique within a project.
    pub id: String,
    /// `Milestone Phase` column.
    pub phase: String,
    /// `Task Type` column. Serialized as `type` to match the exchange shape.
    #[serde(rename = "type")]
    pub kind: String,
    /// `Summary` column.
    pub summary: String,
    pub completed: bool,
    pub notes: String,
    pub completed_date: Option<DateTime<Utc>>,
    /// Cumulative tracked time in whole seconds.
    #[serde(rename = "timeSpent")]
    pub time_spent_secs: u64,
    /// Free-form team member name. Empty when unassigned. Matched by string
    /// equality only; not a referential-integrity-enforced relation.
    pub assigned_to: String,
}

impl Task {
    /// Creates a task from its CSV source columns with default mutable state.
    pub fn new(
        id: impl Into<String>,
        phase: impl Into<String>,
        kind: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            phase: phase.into(),
            kind: kind.into(),
            summary: summary.into(),
            completed: false,
            notes: String::new(),
            completed_date: None,
            time_spent_secs: 0,
            assigned_to: String::new(),
        }
    }

    /// Status label used by write-back and export columns.
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }

    /// Tracked time converted to hours for reporting columns.
    pub fn time_spent_hours(&self) -> f64 {
        self.time_spent_secs as f64 / 3600.0
    }

    /// Overlays the mutable fields from one persisted progress record.
    pub fn apply_progress(&mut self, record: &ProgressRecord) {
        self.completed = record.completed;
        self.notes = record.notes.clone();
        self.completed_date = record.completed_date;
        self.time_spent_secs = record.time_spent_secs;
        self.assigned_to = record.assigned_to.clone();
    }
}

/// One row from the pipe-delimited `Gantt Chart.csv`.
///
/// Read-only projection; never persisted or mutated by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: String,
    pub task: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: String,
    pub phase: String,
}

/// Persisted per-task overlay stored in the progress sidecar.
///
/// Records are created on first mutation of a task and never deleted; the
/// sidecar keeps soft history for tasks that later disappear from the CSV.
/// On-disk field names stay camelCase for compatibility with existing
/// sidecar files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
    /// Cumulative tracked time in whole seconds.
    #[serde(rename = "timeSpent", default)]
    pub time_spent_secs: u64,
    #[serde(default)]
    pub assigned_to: String,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            completed: false,
            notes: String::new(),
            completed_date: None,
            time_spent_secs: 0,
            assigned_to: String::new(),
        }
    }
}

/// Explicit field-by-field overlay applied to one [`ProgressRecord`].
///
/// Exactly these fields are overridable: `completed`, `notes`,
/// `completed_date` and `assigned_to`. Tracked time is excluded on purpose;
/// it only moves through [`crate::store::ProgressStore::record_timer`] so it
/// stays additive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressPatch {
    pub completed: Option<bool>,
    pub notes: Option<String>,
    /// Outer `None` leaves the stored date unchanged; `Some(None)` clears it.
    pub completed_date: Option<Option<DateTime<Utc>>>,
    pub assigned_to: Option<String>,
}

impl ProgressPatch {
    /// Patch for toggling completion, stamping or clearing the completion
    /// date to match.
    pub fn completion(completed: bool, notes: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            completed: Some(completed),
            notes: Some(notes.into()),
            completed_date: Some(if completed { Some(at) } else { None }),
            assigned_to: None,
        }
    }

    /// Patch updating only the notes text.
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    /// Patch updating only the assignee name.
    pub fn assignment(assigned_to: impl Into<String>) -> Self {
        Self {
            assigned_to: Some(assigned_to.into()),
            ..Self::default()
        }
    }

    /// Applies every present field onto `record`, leaving absent ones alone.
    pub fn apply_to(&self, record: &mut ProgressRecord) {
        if let Some(completed) = self.completed {
            record.completed = completed;
        }
        if let Some(notes) = self.notes.as_ref() {
            record.notes = notes.clone();
        }
        if let Some(completed_date) = self.completed_date {
            record.completed_date = completed_date;
        }
        if let Some(assigned_to) = self.assigned_to.as_ref() {
            record.assigned_to = assigned_to.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ProgressPatch, ProgressRecord, Task};
    use chrono::Utc;

    #[test]
    fn new_task_starts_pending_with_defaults() {
        let task = Task::new("t-1", "Phase 1", "Milestone", "Kickoff");
        assert!(!task.completed);
        assert_eq!(task.status_label(), "Pending");
        assert_eq!(task.time_spent_secs, 0);
        assert!(task.assigned_to.is_empty());
    }

    #[test]
    fn completion_patch_stamps_and_clears_date() {
        let now = Utc::now();
        let mut record = ProgressRecord::default();

        ProgressPatch::completion(true, "done", now).apply_to(&mut record);
        assert!(record.completed);
        assert_eq!(record.completed_date, Some(now));

        ProgressPatch::completion(false, "reopened", now).apply_to(&mut record);
        assert!(!record.completed);
        assert_eq!(record.completed_date, None);
    }

    #[test]
    fn partial_patch_leaves_other_fields_untouched() {
        let mut record = ProgressRecord {
            completed: true,
            notes: "original".to_string(),
            time_spent_secs: 120,
            ..ProgressRecord::default()
        };

        ProgressPatch::assignment("Dana").apply_to(&mut record);
        assert!(record.completed);
        assert_eq!(record.notes, "original");
        assert_eq!(record.time_spent_secs, 120);
        assert_eq!(record.assigned_to, "Dana");
    }

    #[test]
    fn apply_progress_overlays_all_mutable_fields() {
        let mut task = Task::new("t-1", "Phase 1", "Task", "Build");
        let record = ProgressRecord {
            completed: true,
            notes: "shipped".to_string(),
            completed_date: Some(Utc::now()),
            time_spent_secs: 7200,
            assigned_to: "Alex".to_string(),
        };

        task.apply_progress(&record);
        assert!(task.completed);
        assert_eq!(task.notes, "shipped");
        assert_eq!(task.time_spent_secs, 7200);
        assert_eq!(task.assigned_to, "Alex");
        assert!((task.time_spent_hours() - 2.0).abs() < f64::EPSILON);
    }
}
