//! Progress sidecar: per-task mutable state keyed by task id.
//!
//! # Responsibility
//! - Load and persist the `.launchpad-progress.json` document.
//! - Apply patches and timer increments through read-modify-write cycles.
//!
//! # Invariants
//! - Records are seeded with defaults on first mutation and never deleted.
//! - `time_spent` only ever grows, and only through [`ProgressStore::record_timer`].
//! - The whole document is rewritten on every mutation; concurrent writers
//!   are out of contract (single local user, last caller wins).

use crate::model::task::{ProgressPatch, ProgressRecord};
use crate::store::StoreResult;
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub(crate) const PROGRESS_FILE_NAME: &str = ".launchpad-progress.json";

/// Mapping persisted in the progress sidecar.
pub type ProgressMap = BTreeMap<String, ProgressRecord>;

/// Handle on one project's progress sidecar file.
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    /// Creates a store rooted at the project directory.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            path: project_root.as_ref().join(PROGRESS_FILE_NAME),
        }
    }

    /// Sidecar file path, mainly for diagnostics.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full progress mapping.
    ///
    /// Missing file and corrupt JSON both return an empty mapping; corrupt
    /// content is warn-logged so the UI can surface a hint without failing.
    pub fn load(&self) -> ProgressMap {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return ProgressMap::new();
            }
            Err(err) => {
                warn!(
                    "event=progress_load module=store status=error error_code=io error={err}"
                );
                return ProgressMap::new();
            }
        };

        match serde_json::from_str::<ProgressMap>(&raw) {
            Ok(map) => map,
            Err(err) => {
                warn!(
                    "event=progress_load module=store status=error error_code=corrupt_json error={err}"
                );
                ProgressMap::new()
            }
        }
    }

    /// Overwrites the sidecar with the full mapping as one pretty-printed
    /// JSON document.
    pub fn save(&self, map: &ProgressMap) -> StoreResult<()> {
        let body = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, body)?;
        info!(
            "event=progress_save module=store status=ok records={}",
            map.len()
        );
        Ok(())
    }

    /// Applies one patch to the record for `task_id`, seeding defaults when
    /// the task has never been touched before. Returns the stored record.
    pub fn upsert(&self, task_id: &str, patch: &ProgressPatch) -> StoreResult<ProgressRecord> {
        let mut map = self.load();
        let record = map.entry(task_id.to_string()).or_default();
        patch.apply_to(record);
        let updated = record.clone();
        self.save(&map)?;
        Ok(updated)
    }

    /// Adds one finished timer run to the cumulative tracked time.
    ///
    /// The caller owns the wall clock; this store only accepts the elapsed
    /// duration and truncates it to whole seconds.
    pub fn record_timer(&self, task_id: &str, elapsed: Duration) -> StoreResult<ProgressRecord> {
        let mut map = self.load();
        let record = map.entry(task_id.to_string()).or_default();
        record.time_spent_secs = record.time_spent_secs.saturating_add(elapsed.as_secs());
        let updated = record.clone();
        self.save(&map)?;
        info!(
            "event=timer_record module=store status=ok task_id={task_id} added_secs={} total_secs={}",
            elapsed.as_secs(),
            updated.time_spent_secs
        );
        Ok(updated)
    }
}
