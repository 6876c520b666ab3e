//! Team sidecar: the free-form member name list.
//!
//! Two on-disk shapes exist in the wild: a bare JSON array of names
//! (legacy) and an object wrapping the array plus a timestamp. Reads accept
//! both; writes standardize on the object shape.

use crate::store::StoreResult;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const TEAM_FILE_NAME: &str = ".launchpad-team.json";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TeamDocument<'a> {
    members: &'a [String],
    last_updated: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TeamDocumentOnDisk {
    Legacy(Vec<String>),
    Wrapped {
        #[serde(default)]
        members: Vec<String>,
    },
}

/// Handle on one project's team sidecar file.
pub struct TeamStore {
    path: PathBuf,
}

impl TeamStore {
    /// Creates a store rooted at the project directory.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            path: project_root.as_ref().join(TEAM_FILE_NAME),
        }
    }

    /// Loads the member name list, accepting both legacy shapes.
    ///
    /// Missing file and corrupt JSON both return an empty list. Member names
    /// are plain strings shared by equality with task assignees and risk
    /// owners; removing a name here does not cascade anywhere.
    pub fn load(&self) -> Vec<String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!("event=team_load module=store status=error error_code=io error={err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<TeamDocumentOnDisk>(&raw) {
            Ok(TeamDocumentOnDisk::Legacy(members)) => members,
            Ok(TeamDocumentOnDisk::Wrapped { members }) => members,
            Err(err) => {
                warn!(
                    "event=team_load module=store status=error error_code=corrupt_json error={err}"
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the sidecar in the object shape with an update timestamp.
    pub fn save(&self, members: &[String]) -> StoreResult<()> {
        let document = TeamDocument {
            members,
            last_updated: Utc::now(),
        };
        let body = serde_json::to_string_pretty(&document)?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}
