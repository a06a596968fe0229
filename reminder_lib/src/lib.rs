//! Client-side layer for the reminder service: session state machine,
//! list/filter/pagination synchronization, notifications, validation, and
//! token persistence on top of the `reminder_api` HTTP client.

pub mod config;
pub mod error;
pub mod messages;
pub mod reminders;
pub mod session;
pub mod store;
pub mod toast;
pub mod token_store;
pub mod validation;

pub use reminder_api;
pub use reminder_api::types;
pub use reminder_api::{Query, ReminderQuery, ReminderSortBy, SortDirection};

pub use config::Config;
pub use error::ReminderError;
pub use reminders::{Applied, FilterChange, Filters, Pagination, ReminderListState};
pub use session::{AuthPhase, SessionState};
pub use store::{PendingDelete, Store};
pub use toast::{Severity, ToastState};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
