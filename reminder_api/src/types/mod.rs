mod meta;
pub use self::meta::{MessageResponse, Response, ServerPagination, DEFAULT_LIMIT};

mod auth;
pub use self::auth::{Credentials, LoginData, LoginResponse, Registration, Tokens};

mod user;
pub use self::user::{MeData, ProfileFields, ProfileResponse, ProfileUpdate, User, UserID};

mod reminder;
pub use self::reminder::{Reminder, ReminderID, ReminderInput, ReminderListResponse, ReminderPage};
