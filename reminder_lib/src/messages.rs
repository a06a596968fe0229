//! Maps request failures onto the messages shown to the user.

use reminder_api::Error;

pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";

pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
pub const LOGIN_INVALID_INPUT: &str = "Invalid input data.";
pub const LOGIN_FAILED_STATUS: &str = "Login failed.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const LOGIN_SUCCESS: &str = "Login successful";

pub const REGISTER_SUCCESS: &str = "Account created successfully! Please login with your credentials.";
pub const REGISTER_CONFLICT: &str = "Email already exists. Please use a different email.";
pub const REGISTER_BAD_REQUEST: &str = "Invalid data provided. Please check your information.";
pub const REGISTER_FAILED: &str = "Failed to create account. Please try again.";

pub const PROFILE_UPDATED: &str = "Profile updated successfully!";
pub const PROFILE_FAILED: &str = "Failed to update profile. Please try again.";

pub const FETCH_FAILED: &str = "Failed to fetch reminders";
pub const CREATE_SUCCESS: &str = "Reminder created successfully";
pub const CREATE_FAILED: &str = "Failed to create reminder";
pub const UPDATE_SUCCESS: &str = "Reminder updated successfully";
pub const UPDATE_FAILED: &str = "Failed to update reminder";
pub const DELETE_SUCCESS: &str = "Reminder deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete reminder";

/// Message for a failed login, classified by HTTP status.
pub fn login_error_message(err: &Error) -> String {
    match err {
        Error::HttpStatus { status: 401, .. } => INVALID_CREDENTIALS.to_string(),
        Error::HttpStatus { status: 400, message, .. } => message
            .clone()
            .unwrap_or_else(|| LOGIN_INVALID_INPUT.to_string()),
        Error::HttpStatus { status: 500, .. } => SERVER_ERROR.to_string(),
        Error::HttpStatus { message, .. } => message
            .clone()
            .unwrap_or_else(|| LOGIN_FAILED_STATUS.to_string()),
        Error::Network(_) => NETWORK_ERROR.to_string(),
        _ => LOGIN_FAILED.to_string(),
    }
}

/// Message for a failed registration. A server-supplied message wins.
pub fn register_error_message(err: &Error) -> String {
    if let Some(message) = err.server_message() {
        return message.to_string();
    }
    match err {
        Error::HttpStatus { status: 409, .. } => REGISTER_CONFLICT.to_string(),
        Error::HttpStatus { status: 400, .. } => REGISTER_BAD_REQUEST.to_string(),
        Error::Network(_) => NETWORK_ERROR.to_string(),
        _ => REGISTER_FAILED.to_string(),
    }
}

/// Message for any other failed action: connectivity, then 5xx, then the
/// server's own message, then `fallback`.
pub fn action_error_message(err: &Error, fallback: &str) -> String {
    match err {
        Error::Network(_) => NETWORK_ERROR.to_string(),
        Error::HttpStatus { status, .. } if *status >= 500 => SERVER_ERROR.to_string(),
        _ => err
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
    }
}
