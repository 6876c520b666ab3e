//! Task list loading, progress overlay and write-back.

use crate::model::task::{ProgressRecord, Task};
use crate::reconcile::{ReconcileError, ReconcileResult};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::Path;

const TASK_COLUMNS: [&str; 4] = ["UUID", "Milestone Phase", "Task Type", "Summary"];
const OVERLAY_COLUMNS: [&str; 4] = ["Assigned To", "Status", "Completed Date", "Notes"];

/// Loads tasks from the comma-delimited `Task List.csv`.
///
/// Every parsed row becomes a [`Task`] with `completed = false`; local
/// completion state only arrives later through [`merge_progress`].
///
/// # Degradation
/// - Missing source file: returns an empty list, not an error.
/// - Row missing a required column (or without a `UUID` value): skipped.
pub fn load_tasks(path: impl AsRef<Path>) -> ReconcileResult<Vec<Task>> {
    let path = path.as_ref();
    let mut reader = match ReaderBuilder::new().flexible(true).from_path(path) {
        Ok(reader) => reader,
        Err(err) if is_not_found(&err) => {
            info!("event=tasks_load module=reconcile status=ok source=missing rows=0");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let headers = reader.headers()?.clone();
    let Some(indexes) = header_indexes(&headers, &TASK_COLUMNS) else {
        warn!(
            "event=tasks_load module=reconcile status=error error_code=missing_headers path={}",
            path.display()
        );
        return Ok(Vec::new());
    };

    let mut tasks = Vec::new();
    let mut skipped = 0_usize;
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                skipped += 1;
                warn!("event=tasks_load module=reconcile status=row_skipped error={err}");
                continue;
            }
        };
        let Some([id, phase, kind, summary]) = pick_fields(&record, &indexes) else {
            skipped += 1;
            continue;
        };
        if id.is_empty() {
            skipped += 1;
            continue;
        }
        tasks.push(Task::new(id, phase, kind, summary));
    }

    info!(
        "event=tasks_load module=reconcile status=ok rows={} skipped={skipped}",
        tasks.len()
    );
    Ok(tasks)
}

/// Overlays persisted progress onto CSV-sourced tasks.
///
/// Left join keyed on task id: tasks without a progress entry keep their
/// defaults. Applying the same mapping twice yields the same result.
pub fn merge_progress(mut tasks: Vec<Task>, progress: &BTreeMap<String, ProgressRecord>) -> Vec<Task> {
    for task in &mut tasks {
        if let Some(record) = progress.get(&task.id) {
            task.apply_progress(record);
        }
    }
    tasks
}

/// Rewrites the original task CSV with four locally tracked columns.
///
/// All original columns are preserved; `Assigned To`, `Status`,
/// `Completed Date` and `Notes` are overwritten (or appended when the
/// source never had them) from the in-memory task whose id matches the
/// row's `UUID`. Rows with no matching task get empty values in those four
/// columns. Every field is quoted; embedded quotes are doubled.
///
/// # Errors
/// - [`ReconcileError::MissingSource`] when the source file does not exist.
/// - [`ReconcileError::EmptySource`] when it parses to zero data rows.
///
/// Both refusals leave the target file untouched.
pub fn write_back(path: impl AsRef<Path>, tasks: &[Task]) -> ReconcileResult<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReconcileError::MissingSource(path.to_path_buf()));
    }

    // The source must be fully read before the writer truncates it.
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(record),
            Err(err) => {
                warn!("event=write_back module=reconcile status=row_skipped error={err}");
            }
        }
    }
    drop(reader);

    if rows.is_empty() {
        return Err(ReconcileError::EmptySource(path.to_path_buf()));
    }

    let uuid_index = headers.iter().position(|name| name == "UUID");
    let mut out_headers: Vec<String> = headers.iter().map(str::to_string).collect();
    let overlay_indexes: Vec<usize> = OVERLAY_COLUMNS
        .iter()
        .map(|column| match out_headers.iter().position(|name| name == column) {
            Some(index) => index,
            None => {
                out_headers.push((*column).to_string());
                out_headers.len() - 1
            }
        })
        .collect();

    let by_id: BTreeMap<&str, &Task> = tasks.iter().map(|task| (task.id.as_str(), task)).collect();

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)?;
    writer.write_record(&out_headers)?;

    for row in &rows {
        let mut fields: Vec<String> = (0..out_headers.len())
            .map(|index| row.get(index).unwrap_or("").to_string())
            .collect();

        let task = uuid_index
            .and_then(|index| row.get(index))
            .and_then(|id| by_id.get(id).copied());
        let overlay = match task {
            Some(task) => [
                task.assigned_to.clone(),
                task.status_label().to_string(),
                task.completed_date
                    .map(|date| date.to_rfc3339())
                    .unwrap_or_default(),
                task.notes.clone(),
            ],
            None => [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        };
        for (position, value) in overlay_indexes.iter().zip(overlay) {
            fields[*position] = value;
        }

        writer.write_record(&fields)?;
    }
    writer.flush()?;

    info!(
        "event=write_back module=reconcile status=ok rows={} tasks={}",
        rows.len(),
        tasks.len()
    );
    Ok(())
}

pub(crate) fn is_not_found(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound
    )
}

pub(crate) fn header_indexes<const N: usize>(
    headers: &StringRecord,
    names: &[&str; N],
) -> Option<[usize; N]> {
    let mut indexes = [0_usize; N];
    for (slot, name) in indexes.iter_mut().zip(names) {
        *slot = headers.iter().position(|header| header == *name)?;
    }
    Some(indexes)
}

pub(crate) fn pick_fields<'r, const N: usize>(
    record: &'r StringRecord,
    indexes: &[usize; N],
) -> Option<[&'r str; N]> {
    let mut fields = [""; N];
    for (slot, index) in fields.iter_mut().zip(indexes) {
        *slot = record.get(*index)?;
    }
    Some(fields)
}
