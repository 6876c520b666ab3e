//! Domain model for LaunchPad project data.
//!
//! # Responsibility
//! - Define the canonical records used by reconciliation, stores and
//!   registries.
//! - Keep derived-field computation (scores, strategies, variances) next to
//!   the data it derives from.
//!
//! # Invariants
//! - `Task.id` is the stable external key sourced from the `UUID` CSV column.
//! - Registry-owned records carry ids assigned at insertion and never reused.

pub mod budget;
pub mod level;
pub mod risk;
pub mod stakeholder;
pub mod task;
