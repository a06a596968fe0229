use serde::{Deserialize, Serialize};

/// Account identifier as issued by the server.
pub type UserID = String;

/// The authenticated account's profile.
///
/// Every field defaults so that a partially populated (or empty) user object
/// still deserializes; a session may legitimately carry an empty user when
/// the profile lookup after login failed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, alias = "_id")]
    pub id: UserID,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.email.is_empty()
    }
}

/// Payload of `GET /auth/me`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MeData {
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of `PATCH /auth/profile`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
}

/// Fields echoed back by `PATCH /auth/profile`. Either may be absent.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Full response of `PATCH /auth/profile`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProfileResponse {
    #[serde(default)]
    pub data: Option<ProfileFields>,
    #[serde(default)]
    pub message: Option<String>,
}
