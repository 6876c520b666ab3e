//! Report CSV export.

use crate::model::task::Task;
use crate::reconcile::ReconcileResult;
use chrono::Utc;
use csv::{QuoteStyle, WriterBuilder};
use log::info;
use std::path::Path;

const EXPORT_HEADERS: [&str; 9] = [
    "UUID",
    "Phase",
    "Type",
    "Summary",
    "Assigned To",
    "Status",
    "Completed Date",
    "Notes",
    "Time Spent (hours)",
];

/// Writes the merged task board to a fresh report CSV.
///
/// One row per task in input order, every field quoted. Tracked time is
/// reported in hours at two decimals; the store keeps seconds.
pub fn export_tasks(path: impl AsRef<Path>, tasks: &[Task]) -> ReconcileResult<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)?;
    writer.write_record(EXPORT_HEADERS)?;

    for task in tasks {
        let completed_date = task
            .completed_date
            .map(|date| date.to_rfc3339())
            .unwrap_or_default();
        let hours = format!("{:.2}", task.time_spent_hours());
        writer.write_record([
            task.id.as_str(),
            task.phase.as_str(),
            task.kind.as_str(),
            task.summary.as_str(),
            task.assigned_to.as_str(),
            task.status_label(),
            completed_date.as_str(),
            task.notes.as_str(),
            hours.as_str(),
        ])?;
    }
    writer.flush()?;

    info!(
        "event=tasks_export module=reconcile status=ok rows={} path={}",
        tasks.len(),
        path.display()
    );
    Ok(())
}

/// Suggested file name for a report export, stamped with the current date.
pub fn export_file_name(tag: &str) -> String {
    format!("launchpad-export-{tag}-{}.csv", Utc::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_file_name_carries_tag_and_date() {
        let name = export_file_name("tasks");
        assert!(name.starts_with("launchpad-export-tasks-"));
        assert!(name.ends_with(".csv"));
        let stamp = &name["launchpad-export-tasks-".len()..name.len() - ".csv".len()];
        assert_eq!(stamp.len(), 10);
        assert_eq!(stamp.matches('-').count(), 2);
    }
}
