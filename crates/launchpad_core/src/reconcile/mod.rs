//! CSV reconciliation between externally authored project files and local
//! progress state.
//!
//! # Responsibility
//! - Parse the comma-delimited task list and pipe-delimited Gantt timeline.
//! - Overlay persisted progress onto CSV-sourced tasks (left join on id).
//! - Write the task list back with locally tracked columns, and export
//!   report CSVs.
//!
//! # Invariants
//! - CSV is never the source of completion truth: loaded tasks always start
//!   `completed = false`.
//! - A row missing a required column is skipped whole; no partial record is
//!   emitted.
//! - Write-back refuses to run against an absent or empty source file so it
//!   can never destroy existing data.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod export;
mod tasks;
mod timeline;

pub use export::{export_file_name, export_tasks};
pub use tasks::{load_tasks, merge_progress, write_back};
pub use timeline::load_timeline;

pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Reconciliation error. Load paths return these only for transport
/// failures; missing files and malformed rows degrade to empty/skipped by
/// contract.
#[derive(Debug)]
pub enum ReconcileError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// Write-back target's source CSV does not exist.
    MissingSource(PathBuf),
    /// Write-back source parsed to zero data rows.
    EmptySource(PathBuf),
}

impl Display for ReconcileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "csv io failure: {err}"),
            Self::Csv(err) => write!(f, "csv parse failure: {err}"),
            Self::MissingSource(path) => {
                write!(f, "source csv does not exist: {}", path.display())
            }
            Self::EmptySource(path) => {
                write!(f, "source csv has no data rows: {}", path.display())
            }
        }
    }
}

impl Error for ReconcileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::MissingSource(_) | Self::EmptySource(_) => None,
        }
    }
}

impl From<std::io::Error> for ReconcileError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ReconcileError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
