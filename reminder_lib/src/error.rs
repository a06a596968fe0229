//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding persistence, validation and session failures.
#[derive(Debug)]
pub enum ReminderError {
    /// An error from the underlying API client.
    Api(reminder_api::Error),
    /// Reading or writing persisted client state failed.
    Io(std::io::Error),
    /// User-provided input failed validation. No request was sent.
    InvalidInput(String),
    /// The action needs a logged-in session.
    NotAuthenticated,
    /// A request was sent and failed; carries the message shown to the user.
    Action(String),
}

impl ReminderError {
    /// The text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) | Self::Action(msg) => msg.clone(),
            Self::NotAuthenticated => "Please login to continue.".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ReminderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Io(e) => write!(f, "Storage error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::NotAuthenticated => write!(f, "Not authenticated"),
            Self::Action(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ReminderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reminder_api::Error> for ReminderError {
    fn from(e: reminder_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<std::io::Error> for ReminderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
