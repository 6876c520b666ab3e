//! Core domain logic for LaunchPad.
//! This crate is the single source of truth for project-management state.

pub mod logging;
pub mod model;
pub mod project;
pub mod reconcile;
pub mod registry;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use model::budget::{
    AlertSeverity, BudgetAlert, BudgetCategory, BudgetItem, BudgetSummary, Expense, NewExpense,
};
pub use model::level::Level;
pub use model::risk::{NewRisk, Risk, RiskCategory, RiskStatus};
pub use model::stakeholder::{
    CommunicationEntry, EngagementStrategy, NewCommunication, NewStakeholder, Stakeholder,
    StakeholderType,
};
pub use model::task::{ProgressPatch, ProgressRecord, Task, TimelineEntry};
pub use project::{ProjectInfo, ProjectLayout, ProjectSession};
pub use reconcile::{ReconcileError, ReconcileResult};
pub use registry::{BudgetRegistry, RiskRegistry, StakeholderRegistry};
pub use store::{ProgressStore, StoreError, StoreResult, TeamStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
