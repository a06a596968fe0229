use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login/email`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register/email`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginData {
    #[serde(default)]
    pub tokens: Tokens,
}

/// Response of `POST /auth/login/email`. Only the access token is used.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub data: LoginData,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// The access token, if the server issued a non-empty one.
    pub fn access_token(&self) -> Option<&str> {
        self.data
            .tokens
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}
