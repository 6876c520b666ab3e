//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `launchpad_core` linkage.
//! - With a project root argument, print a quick board summary.

use launchpad_core::ProjectSession;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("launchpad_core version={}", launchpad_core::core_version());

    let Some(root) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let session = ProjectSession::open(root);
    let info = session.project_info();
    println!("project={}", info.name);
    println!("summary={}", info.summary);

    match session.load_board() {
        Ok(board) => {
            let completed = board.iter().filter(|task| task.completed).count();
            println!("tasks={} completed={completed}", board.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to load task board: {err}");
            ExitCode::FAILURE
        }
    }
}
