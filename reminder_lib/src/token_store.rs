//! Persistence of the opaque access token.
//!
//! The token is the only piece of session state that outlives the process.
//! Each write replaces it whole; readers see either the old token, the new
//! one, or none.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::ReminderError;

/// File name of the persisted token inside the state directory.
pub const TOKEN_FILE: &str = "auth_token";

pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, ReminderError>;
    fn save(&self, token: &str) -> Result<(), ReminderError>;
    /// Removes the token. Clearing an absent token succeeds.
    fn clear(&self) -> Result<(), ReminderError>;
}

/// Stores the token as the sole content of `<dir>/auth_token`.
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, ReminderError> {
        match std::fs::read_to_string(self.path()) {
            Ok(contents) => {
                let token = contents.trim();
                Ok(if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), ReminderError> {
        std::fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!("{}.tmp", TOKEN_FILE));
        std::fs::write(&tmp, token)?;
        std::fs::rename(&tmp, self.path())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ReminderError> {
        match std::fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process token storage, for tests and embedders without a filesystem.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ReminderError> {
        Ok(self.token.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, token: &str) -> Result<(), ReminderError> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ReminderError> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
