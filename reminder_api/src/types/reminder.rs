use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meta::ServerPagination;

pub type ReminderID = String;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(alias = "_id")]
    pub id: ReminderID,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub scheduled_at: DateTime<Utc>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /reminder` and `PUT /reminder/:id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderInput {
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
}

/// Payload of `GET /reminder`. `pagination` is absent on some server builds.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ReminderPage {
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub pagination: Option<ServerPagination>,
}

/// Full response of `GET /reminder`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ReminderListResponse {
    #[serde(default)]
    pub data: ReminderPage,
    #[serde(default)]
    pub message: Option<String>,
}
