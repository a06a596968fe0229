//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never got a response (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The API returned a non-success status. `message` is the server's
    /// `message` field when the body carried one.
    #[error("Request failed with status {status}")]
    HttpStatus {
        status: u16,
        message: Option<String>,
        body: String,
    },
    /// A success response whose body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` the server sent alongside an error status.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::HttpStatus { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True when no response was received.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}
