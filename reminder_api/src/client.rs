//! HTTP client for the reminder REST API.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    query::{Query, ReminderQuery},
    types::{
        Credentials, LoginResponse, MeData, MessageResponse, ProfileResponse, ProfileUpdate,
        Registration, ReminderInput, ReminderListResponse, Response,
    },
    Error,
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the reminder REST API.
///
/// Holds a single `reqwest::Client` and an optional bearer token. The token
/// is read on every request, so setting or clearing it affects all
/// subsequent calls made through the same client.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
    token: RwLock<Option<String>>,
}

impl Client {
    /// Creates a new client pointing at [`DEFAULT_BASE_URL`].
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom base URL and request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Network(e)
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// Sets the bearer token attached to every subsequent request.
    pub fn set_token(&self, token: &str) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    /// Drops the bearer token; subsequent requests go out unauthenticated.
    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })
    }

    async fn send<T, B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::debug!("{} {}", method, url);
        let mut req = self
            .http
            .request(method.clone(), url)
            .header("accept", "application/json, text/plain, */*");
        let token = self
            .token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::error!("{} request failed before a response: {}", method, e);
            Error::Network(e)
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Network(e)
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                message: server_message(&body),
                body: snippet,
            });
        }

        // 204s and bare 200s carry no body; treat them as an empty object
        let text = if body.trim().is_empty() { "{}" } else { body.as_str() };
        let parsed = serde_json::from_str::<T>(text).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })?;

        Ok(parsed)
    }

    /// Creates an account. The response shape varies by server build and is
    /// returned untyped; registration does not start a session.
    pub async fn register(&self, registration: &Registration) -> Result<serde_json::Value, Error> {
        let url = self.get_url("/auth/register/email")?;
        self.send(Method::POST, url, Some(registration)).await
    }

    /// Exchanges credentials for an access token.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, Error> {
        let url = self.get_url("/auth/login/email")?;
        self.send(Method::POST, url, Some(credentials)).await
    }

    /// Fetches the profile of the account the current token belongs to.
    pub async fn me(&self) -> Result<Response<MeData>, Error> {
        let url = self.get_url("/auth/me")?;
        self.send::<_, ()>(Method::GET, url, None).await
    }

    /// Updates first and last name of the current account.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileResponse, Error> {
        let url = self.get_url("/auth/profile")?;
        self.send(Method::PATCH, url, Some(update)).await
    }

    /// Fetches one page of reminders matching the given query.
    pub async fn list_reminders(&self, query: &ReminderQuery) -> Result<ReminderListResponse, Error> {
        let url = query.add_to_url(&self.get_url("/reminder")?);
        self.send::<_, ()>(Method::GET, url, None).await
    }

    pub async fn create_reminder(&self, input: &ReminderInput) -> Result<MessageResponse, Error> {
        let url = self.get_url("/reminder")?;
        self.send(Method::POST, url, Some(input)).await
    }

    pub async fn update_reminder(
        &self,
        id: &str,
        input: &ReminderInput,
    ) -> Result<MessageResponse, Error> {
        let url = self.get_url(format!("/reminder/{}", id).as_str())?;
        self.send(Method::PUT, url, Some(input)).await
    }

    pub async fn delete_reminder(&self, id: &str) -> Result<MessageResponse, Error> {
        let url = self.get_url(format!("/reminder/{}", id).as_str())?;
        self.send::<_, ()>(Method::DELETE, url, None).await
    }
}

/// Pulls a top-level `message` string out of an error body, if it is JSON.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
