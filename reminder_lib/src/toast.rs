//! Single-slot transient notification.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

/// The notification slot. Last write wins: `show` replaces whatever is
/// there, `hide` only closes it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ToastState {
    pub open: bool,
    pub message: String,
    pub severity: Severity,
}

impl ToastState {
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.open = true;
        self.message = message.into();
        self.severity = severity;
    }

    /// Closes the toast. Message and severity stay until the next `show`.
    pub fn hide(&mut self) {
        self.open = false;
    }
}
