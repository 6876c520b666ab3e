//! In-memory record registries.
//!
//! # Responsibility
//! - Own the authoritative in-memory collections for budget, risk and
//!   stakeholder records.
//! - Derive classifications (risk score, engagement strategy) and on-demand
//!   aggregates (summaries, matrices, alerts).
//!
//! # Contract
//! - Registries are plain mutable state; callers serialize access. No
//!   registry performs I/O.
//! - Derived aggregates are recomputed per call and never cached.

pub mod budget;
pub mod risk;
pub mod stakeholder;

pub use budget::BudgetRegistry;
pub use risk::RiskRegistry;
pub use stakeholder::StakeholderRegistry;
