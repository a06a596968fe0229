//! Client-side validation. Every check here runs before a request is built;
//! a failure means nothing was sent.

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use reminder_api::types::{Credentials, ProfileUpdate, Registration, ReminderInput};

use crate::error::ReminderError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MIN_TITLE_LENGTH: usize = 3;
pub const MIN_DESCRIPTION_LENGTH: usize = 10;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_NAME_LENGTH: usize = 2;

/// Accepted non-RFC 3339 layouts for a scheduled time, read as UTC.
const SCHEDULE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

fn invalid(msg: &str) -> ReminderError {
    ReminderError::InvalidInput(msg.to_string())
}

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit. Unlike the form fields, an empty result is allowed.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, ReminderError> {
    if input.len() > max_len {
        return Err(ReminderError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    Ok(input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string())
}

/// Validate search text: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, ReminderError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: i64) -> Result<i64, ReminderError> {
    if page < 1 {
        return Err(invalid("page must be >= 1"));
    }
    Ok(page)
}

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: i64) -> Result<i64, ReminderError> {
    if !(1..=100).contains(&page_size) {
        return Err(invalid("page_size must be between 1 and 100"));
    }
    Ok(page_size)
}

/// Parse a scheduled time: RFC 3339, or `YYYY-MM-DD HH:MM` taken as UTC.
pub fn parse_schedule(input: &str) -> Result<DateTime<Utc>, ReminderError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("Date and time is required"));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in SCHEDULE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }
    Err(ReminderError::InvalidInput(format!(
        "invalid date '{}'. Use RFC 3339 (2030-01-31T09:00:00Z) or YYYY-MM-DD HH:MM",
        trimmed
    )))
}

/// Validate a reminder form against `now`. Returns the request body on success.
pub fn validate_reminder(
    title: &str,
    description: &str,
    scheduled_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<ReminderInput, ReminderError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(invalid("Title is required"));
    }
    if title.chars().count() < MIN_TITLE_LENGTH {
        return Err(invalid("Title must be at least 3 characters"));
    }

    let description = description.trim();
    if description.is_empty() {
        return Err(invalid("Description is required"));
    }
    if description.chars().count() < MIN_DESCRIPTION_LENGTH {
        return Err(invalid("Description must be at least 10 characters"));
    }

    let scheduled_at = scheduled_at.ok_or_else(|| invalid("Date and time is required"))?;
    if scheduled_at <= now {
        return Err(invalid("Date and time must be in the future"));
    }

    Ok(ReminderInput {
        title: title.to_string(),
        description: description.to_string(),
        scheduled_at,
    })
}

/// Validate an email address: required, and shaped like `local@domain.tld`.
pub fn validate_email(input: &str) -> Result<String, ReminderError> {
    let email = input.trim();
    if email.is_empty() {
        return Err(invalid("Email is required"));
    }
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| ReminderError::InvalidInput(format!("regex compile error: {}", e)))?;
    if !re.is_match(email) {
        return Err(invalid("Invalid email address"));
    }
    Ok(email.to_string())
}

fn validate_name(input: &str, field: &str) -> Result<String, ReminderError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ReminderError::InvalidInput(format!("{} is required", field)));
    }
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(ReminderError::InvalidInput(format!(
            "{} must be at least {} characters",
            field, MIN_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

pub fn validate_login(email: &str, password: &str) -> Result<Credentials, ReminderError> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(invalid("Password is required"));
    }
    Ok(Credentials {
        email,
        password: password.to_string(),
    })
}

pub fn validate_registration(
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Registration, ReminderError> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(invalid("Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(invalid("Password must be at least 6 characters"));
    }
    Ok(Registration {
        email,
        password: password.to_string(),
        first_name: validate_name(first_name, "First name")?,
        last_name: validate_name(last_name, "Last name")?,
    })
}

pub fn validate_profile(first_name: &str, last_name: &str) -> Result<ProfileUpdate, ReminderError> {
    Ok(ProfileUpdate {
        first_name: validate_name(first_name, "First name")?,
        last_name: validate_name(last_name, "Last name")?,
    })
}
