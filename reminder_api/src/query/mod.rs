mod common;
pub use self::common::{Query, QueryCommon, SortDirection};

mod reminder;
pub use self::reminder::{ReminderQuery, ReminderSortBy};
