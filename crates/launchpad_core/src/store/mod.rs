//! JSON sidecar persistence for locally tracked project state.
//!
//! # Responsibility
//! - Own the read/modify/rewrite cycle for the progress and team sidecars.
//! - Keep file-shape details out of registries and reconciliation.
//!
//! # Invariants
//! - Every save is a whole-document overwrite; last caller wins.
//! - Missing or corrupt sidecar files degrade to empty state, never to a
//!   fatal error.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod progress;
mod team;

pub use progress::ProgressStore;
pub use team::TeamStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Sidecar persistence error. Only write paths surface these; read paths
/// degrade to defaults by contract.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "sidecar io failure: {err}"),
            Self::Json(err) => write!(f, "sidecar json failure: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
