//! The last list view (filters and pagination), kept next to the token so
//! that `--next`/`--prev` continue from where the previous run stopped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use reminder_lib::{Filters, Pagination, ReminderListState};
use serde::{Deserialize, Serialize};

const FILE_NAME: &str = "view_state.json";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub filters: Filters,
    #[serde(default)]
    pub pagination: Pagination,
}

impl From<&ReminderListState> for ViewState {
    fn from(list: &ReminderListState) -> Self {
        Self {
            filters: list.filters.clone(),
            pagination: list.pagination.clone(),
        }
    }
}

pub struct ViewStateFile {
    path: PathBuf,
}

impl ViewStateFile {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(FILE_NAME),
        }
    }

    /// A missing or unreadable file yields the default view.
    pub fn load(&self) -> ViewState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return ViewState::default(),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", self.path.display(), e);
                return ViewState::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed {}: {}", self.path.display(), e);
            ViewState::default()
        })
    }

    pub fn save(&self, state: &ViewState) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(state)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
