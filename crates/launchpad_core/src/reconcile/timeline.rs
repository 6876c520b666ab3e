//! Gantt timeline loading.

use crate::model::task::TimelineEntry;
use crate::reconcile::tasks::{header_indexes, is_not_found, pick_fields};
use crate::reconcile::ReconcileResult;
use csv::ReaderBuilder;
use log::{info, warn};
use std::path::Path;

const TIMELINE_COLUMNS: [&str; 6] = [
    "UUID",
    "Task",
    "Start Date",
    "End Date",
    "Duration",
    "Plan Phase Type",
];

/// Loads timeline entries from the pipe-delimited `Gantt Chart.csv`.
///
/// Dates and durations stay as the strings the file carries; rendering
/// decides how to interpret them. Same degradation contract as task
/// loading: missing file or missing headers yield an empty list, bad rows
/// are skipped.
pub fn load_timeline(path: impl AsRef<Path>) -> ReconcileResult<Vec<TimelineEntry>> {
    let path = path.as_ref();
    let mut reader = match ReaderBuilder::new()
        .delimiter(b'|')
        .flexible(true)
        .from_path(path)
    {
        Ok(reader) => reader,
        Err(err) if is_not_found(&err) => {
            info!("event=timeline_load module=reconcile status=ok source=missing rows=0");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let headers = reader.headers()?.clone();
    let Some(indexes) = header_indexes(&headers, &TIMELINE_COLUMNS) else {
        warn!(
            "event=timeline_load module=reconcile status=error error_code=missing_headers path={}",
            path.display()
        );
        return Ok(Vec::new());
    };

    let mut entries = Vec::new();
    let mut skipped = 0_usize;
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                skipped += 1;
                warn!("event=timeline_load module=reconcile status=row_skipped error={err}");
                continue;
            }
        };
        let Some([id, task, start_date, end_date, duration, phase]) =
            pick_fields(&record, &indexes)
        else {
            skipped += 1;
            continue;
        };
        if id.is_empty() {
            skipped += 1;
            continue;
        }
        entries.push(TimelineEntry {
            id: id.to_string(),
            task: task.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            duration: duration.to_string(),
            phase: phase.to_string(),
        });
    }

    info!(
        "event=timeline_load module=reconcile status=ok rows={} skipped={skipped}",
        entries.len()
    );
    Ok(entries)
}
