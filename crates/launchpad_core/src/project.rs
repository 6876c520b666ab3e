//! Project root layout and the per-project session context.
//!
//! # Responsibility
//! - Resolve the fixed file layout under one project root.
//! - Bundle stores and registries into one session object so callers hold a
//!   single handle per open project.
//!
//! # Contract
//! - One session per open project; independent projects get independent
//!   sessions and never share state through globals.

use crate::model::task::{ProgressPatch, ProgressRecord, Task, TimelineEntry};
use crate::reconcile::{self, ReconcileError, ReconcileResult};
use crate::registry::{BudgetRegistry, RiskRegistry, StakeholderRegistry};
use crate::store::{ProgressStore, StoreError, StoreResult, TeamStore};
use chrono::Utc;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

const SUMMARY_SUBPATH: &str = "01-Planning Documents/Business Summary.md";
const TASKS_SUBPATH: &str = "03-Project Management/Task List.csv";
const TIMELINE_SUBPATH: &str = "03-Project Management/Gantt Chart.csv";
const PRESENTATIONS_DIR: &str = "Presentations";
const NO_SUMMARY: &str = "No summary available";

static MARKDOWN_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#+\s*").expect("heading pattern is valid"));

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(Debug)]
pub enum ProjectError {
    Io(std::io::Error),
    Store(StoreError),
    Reconcile(ReconcileError),
}

impl Display for ProjectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "project io failure: {err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Reconcile(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Reconcile(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ProjectError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StoreError> for ProjectError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ReconcileError> for ProjectError {
    fn from(value: ReconcileError) -> Self {
        Self::Reconcile(value)
    }
}

/// Fixed file layout under one project root directory.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `01-Planning Documents/Business Summary.md`
    pub fn summary_path(&self) -> PathBuf {
        self.root.join(SUMMARY_SUBPATH)
    }

    /// `03-Project Management/Task List.csv`
    pub fn tasks_path(&self) -> PathBuf {
        self.root.join(TASKS_SUBPATH)
    }

    /// `03-Project Management/Gantt Chart.csv`
    pub fn timeline_path(&self) -> PathBuf {
        self.root.join(TIMELINE_SUBPATH)
    }

    /// Fresh timestamped chart export directory under `Presentations`.
    pub fn chart_export_dir(&self) -> PathBuf {
        let stamp = Utc::now().format("Charts_%Y-%m-%d_%H-%M-%S").to_string();
        self.root.join(PRESENTATIONS_DIR).join(stamp)
    }
}

/// Display name, summary line and root path for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub summary: String,
    pub path: PathBuf,
}

/// One rendered chart image ready for export.
pub struct ChartImage {
    pub name: String,
    pub png: Vec<u8>,
}

/// Result of one chart export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartExport {
    pub directory: PathBuf,
    pub file_names: Vec<String>,
}

/// Everything open for one project: layout, sidecar stores and the three
/// record registries. Drop the session to close the project.
pub struct ProjectSession {
    layout: ProjectLayout,
    progress: ProgressStore,
    team: TeamStore,
    pub budget: BudgetRegistry,
    pub risks: RiskRegistry,
    pub stakeholders: StakeholderRegistry,
}

impl ProjectSession {
    /// Opens a session on the given project root. No I/O happens until the
    /// first load or save.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let layout = ProjectLayout::new(root);
        let progress = ProgressStore::new(layout.root());
        let team = TeamStore::new(layout.root());
        info!(
            "event=project_open module=project status=ok root={}",
            layout.root().display()
        );
        Self {
            layout,
            progress,
            team,
            budget: BudgetRegistry::new(),
            risks: RiskRegistry::new(),
            stakeholders: StakeholderRegistry::new(),
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Project name from the root directory plus the first line of
    /// `Business Summary.md` with its heading marker stripped. Falls back
    /// to a placeholder summary when the file is missing or the first line
    /// is blank.
    pub fn project_info(&self) -> ProjectInfo {
        let name = self
            .layout
            .root()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled Project".to_string());

        let summary = match std::fs::read_to_string(self.layout.summary_path()) {
            Ok(body) => {
                let first_line = body.lines().next().unwrap_or_default().trim();
                let stripped = MARKDOWN_HEADING.replace(first_line, "");
                let stripped = stripped.trim();
                if stripped.is_empty() {
                    NO_SUMMARY.to_string()
                } else {
                    stripped.to_string()
                }
            }
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("event=project_info module=project status=error error={err}");
                }
                NO_SUMMARY.to_string()
            }
        };

        ProjectInfo {
            name,
            summary,
            path: self.layout.root().to_path_buf(),
        }
    }

    /// Loads the task board: CSV tasks with persisted progress overlaid.
    pub fn load_board(&self) -> ReconcileResult<Vec<Task>> {
        let tasks = reconcile::load_tasks(self.layout.tasks_path())?;
        Ok(reconcile::merge_progress(tasks, &self.progress.load()))
    }

    /// Loads the Gantt timeline entries.
    pub fn load_timeline(&self) -> ReconcileResult<Vec<TimelineEntry>> {
        reconcile::load_timeline(self.layout.timeline_path())
    }

    /// Applies one progress patch and persists the sidecar.
    pub fn update_progress(
        &self,
        task_id: &str,
        patch: &ProgressPatch,
    ) -> StoreResult<ProgressRecord> {
        self.progress.upsert(task_id, patch)
    }

    /// Adds one finished timer run to a task's tracked time.
    pub fn record_timer(&self, task_id: &str, elapsed: Duration) -> StoreResult<ProgressRecord> {
        self.progress.record_timer(task_id, elapsed)
    }

    /// Writes the current board state back into the original task CSV.
    pub fn sync_to_source(&self) -> ProjectResult<()> {
        let board = self.load_board()?;
        reconcile::write_back(self.layout.tasks_path(), &board)?;
        Ok(())
    }

    /// Exports the current board to a report CSV at `path`.
    pub fn export_board(&self, path: impl AsRef<Path>) -> ProjectResult<()> {
        let board = self.load_board()?;
        reconcile::export_tasks(path, &board)?;
        Ok(())
    }

    /// Team member names from the team sidecar.
    pub fn team_members(&self) -> Vec<String> {
        self.team.load()
    }

    /// Replaces the team member list.
    pub fn save_team_members(&self, members: &[String]) -> StoreResult<()> {
        self.team.save(members)
    }

    /// Writes rendered chart images into a fresh timestamped directory
    /// under `Presentations`, one PNG per chart.
    pub fn export_charts(&self, charts: &[ChartImage]) -> ProjectResult<ChartExport> {
        let directory = self.layout.chart_export_dir();
        std::fs::create_dir_all(&directory)?;

        let mut file_names = Vec::with_capacity(charts.len());
        for chart in charts {
            let file_name = format!("{}.png", chart.name);
            std::fs::write(directory.join(&file_name), &chart.png)?;
            file_names.push(file_name);
        }

        info!(
            "event=charts_export module=project status=ok count={} dir={}",
            file_names.len(),
            directory.display()
        );
        Ok(ChartExport {
            directory,
            file_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_resolves_fixed_subpaths() {
        let layout = ProjectLayout::new("/projects/apollo");
        assert!(layout
            .summary_path()
            .ends_with("01-Planning Documents/Business Summary.md"));
        assert!(layout
            .tasks_path()
            .ends_with("03-Project Management/Task List.csv"));
        assert!(layout
            .timeline_path()
            .ends_with("03-Project Management/Gantt Chart.csv"));

        let charts = layout.chart_export_dir();
        assert!(charts.starts_with("/projects/apollo/Presentations"));
        let leaf = charts
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        assert!(leaf.starts_with("Charts_"));
    }

    #[test]
    fn heading_pattern_strips_markdown_markers() {
        assert_eq!(MARKDOWN_HEADING.replace("## Overview", ""), "Overview");
        assert_eq!(MARKDOWN_HEADING.replace("# Apollo", ""), "Apollo");
        assert_eq!(MARKDOWN_HEADING.replace("plain text", ""), "plain text");
    }
}
