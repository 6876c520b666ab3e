//! Integration tests for the per-project session context.

use chrono::Utc;
use launchpad_core::project::ChartImage;
use launchpad_core::{ProgressPatch, ProjectSession};
use std::time::Duration;
use tempfile::TempDir;

fn seed_project(dir: &TempDir) {
    let management = dir.path().join("03-Project Management");
    std::fs::create_dir_all(&management).expect("management dir should be created");
    std::fs::write(
        management.join("Task List.csv"),
        "UUID,Milestone Phase,Task Type,Summary\n\
         t-1,Phase 1,Milestone,Kickoff\n\
         t-2,Phase 1,Task,Draft plan\n",
    )
    .expect("task list write should succeed");
    std::fs::write(
        management.join("Gantt Chart.csv"),
        "UUID|Task|Start Date|End Date|Duration|Plan Phase Type\n\
         g-1|Kickoff|2026-01-05|2026-01-09|5d|Phase 1\n",
    )
    .expect("gantt write should succeed");

    let planning = dir.path().join("01-Planning Documents");
    std::fs::create_dir_all(&planning).expect("planning dir should be created");
    std::fs::write(
        planning.join("Business Summary.md"),
        "# Apollo\n\nA project-management workspace for the Apollo launch.\n",
    )
    .expect("summary write should succeed");
}

#[test]
fn project_info_takes_first_line_with_heading_marker_stripped() {
    let dir = TempDir::new().expect("temp dir should be created");
    seed_project(&dir);

    let session = ProjectSession::open(dir.path());
    let info = session.project_info();
    assert_eq!(info.summary, "Apollo");
    assert!(!info.name.is_empty());
    assert_eq!(info.path, dir.path());
}

#[test]
fn project_info_keeps_a_plain_first_line_verbatim() {
    let dir = TempDir::new().expect("temp dir should be created");
    let planning = dir.path().join("01-Planning Documents");
    std::fs::create_dir_all(&planning).expect("planning dir should be created");
    std::fs::write(
        planning.join("Business Summary.md"),
        "Workspace for the Apollo launch.\n\nMore detail below.\n",
    )
    .expect("summary write should succeed");

    let session = ProjectSession::open(dir.path());
    assert_eq!(
        session.project_info().summary,
        "Workspace for the Apollo launch."
    );
}

#[test]
fn project_info_falls_back_without_summary_file() {
    let dir = TempDir::new().expect("temp dir should be created");
    let session = ProjectSession::open(dir.path());
    assert_eq!(session.project_info().summary, "No summary available");
}

#[test]
fn board_merges_persisted_progress_over_csv_rows() {
    let dir = TempDir::new().expect("temp dir should be created");
    seed_project(&dir);
    let session = ProjectSession::open(dir.path());

    session
        .update_progress("t-1", &ProgressPatch::completion(true, "kicked off", Utc::now()))
        .expect("progress update should succeed");
    session
        .record_timer("t-1", Duration::from_secs(1800))
        .expect("timer should persist");

    let board = session.load_board().expect("board should load");
    assert_eq!(board.len(), 2);
    let kickoff = &board[0];
    assert_eq!(kickoff.id, "t-1");
    assert!(kickoff.completed);
    assert_eq!(kickoff.notes, "kicked off");
    assert_eq!(kickoff.time_spent_secs, 1800);
    assert!(!board[1].completed);

    let timeline = session.load_timeline().expect("timeline should load");
    assert_eq!(timeline.len(), 1);
}

#[test]
fn sync_to_source_rewrites_the_task_csv() {
    let dir = TempDir::new().expect("temp dir should be created");
    seed_project(&dir);
    let session = ProjectSession::open(dir.path());

    session
        .update_progress("t-2", &ProgressPatch::assignment("Dana"))
        .expect("progress update should succeed");
    session.sync_to_source().expect("sync should succeed");

    let body = std::fs::read_to_string(session.layout().tasks_path())
        .expect("task list should be readable");
    assert!(body.contains("\"Assigned To\""));
    assert!(body.contains("\"Dana\",\"Pending\""));
}

#[test]
fn export_board_writes_a_report_csv() {
    let dir = TempDir::new().expect("temp dir should be created");
    seed_project(&dir);
    let session = ProjectSession::open(dir.path());

    let report = dir.path().join("report.csv");
    session.export_board(&report).expect("export should succeed");

    let body = std::fs::read_to_string(&report).expect("report should be readable");
    assert!(body.starts_with("\"UUID\",\"Phase\""));
    assert!(body.contains("\"t-2\""));
}

#[test]
fn chart_export_creates_timestamped_directory() {
    let dir = TempDir::new().expect("temp dir should be created");
    let session = ProjectSession::open(dir.path());

    let charts = [
        ChartImage {
            name: "budget-overview".to_string(),
            png: vec![0x89, 0x50, 0x4e, 0x47],
        },
        ChartImage {
            name: "risk-matrix".to_string(),
            png: vec![0x89, 0x50, 0x4e, 0x47],
        },
    ];
    let export = session.export_charts(&charts).expect("export should succeed");

    assert_eq!(export.file_names.len(), 2);
    assert!(export.directory.starts_with(dir.path().join("Presentations")));
    for file_name in &export.file_names {
        assert!(export.directory.join(file_name).is_file());
    }
}

#[test]
fn team_members_round_trip_through_the_session() {
    let dir = TempDir::new().expect("temp dir should be created");
    let session = ProjectSession::open(dir.path());

    assert!(session.team_members().is_empty());
    session
        .save_team_members(&["Dana".to_string(), "Riley".to_string()])
        .expect("save should succeed");
    assert_eq!(
        session.team_members(),
        vec!["Dana".to_string(), "Riley".to_string()]
    );
}
