//! The client-side store: three independently owned slices and the async
//! actions that move them.
//!
//! Slices are only changed through their own handler methods, and locks are
//! never held across a request. Every network call in the client happens in
//! one of the actions below.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use reminder_api::types::{Reminder, User};
use reminder_api::Client;

use crate::config::Config;
use crate::error::ReminderError;
use crate::messages;
use crate::reminders::{Applied, FilterChange, Filters, Pagination, ReminderListState};
use crate::session::{AuthPhase, SessionState};
use crate::toast::{Severity, ToastState};
use crate::token_store::{FileTokenStore, TokenStore};
use crate::validation;

/// A delete the user has been asked to confirm. Only [`Store::request_delete`]
/// creates one, and [`Store::delete_reminder`] consumes it, so a delete
/// request cannot be sent without passing through a confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    id: String,
    title: Option<String>,
}

impl PendingDelete {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Title of the reminder, when it is on the currently loaded page.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

pub struct Store {
    client: Client,
    tokens: Box<dyn TokenStore>,
    session: Mutex<SessionState>,
    list: Mutex<ReminderListState>,
    toast: Mutex<ToastState>,
}

impl Store {
    pub fn new(client: Client, tokens: Box<dyn TokenStore>) -> Self {
        Self {
            client,
            tokens,
            session: Mutex::new(SessionState::default()),
            list: Mutex::new(ReminderListState::default()),
            toast: Mutex::new(ToastState::default()),
        }
    }

    /// Builds a store backed by a file token store in `config.state_dir`.
    pub fn from_config(config: &Config) -> Result<Self, ReminderError> {
        let client = Client::with_timeout(&config.base_url, config.timeout)?;
        let tokens = FileTokenStore::new(config.state_dir.clone());
        Ok(Self::new(client, Box::new(tokens)).with_page_size(config.page_size))
    }

    pub fn with_page_size(self, page_size: i64) -> Self {
        *self.list() = ReminderListState::with_page_size(page_size);
        self
    }

    fn session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn list(&self) -> MutexGuard<'_, ReminderListState> {
        self.list.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn toast(&self) -> MutexGuard<'_, ToastState> {
        self.toast.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn session_snapshot(&self) -> SessionState {
        self.session().clone()
    }

    pub fn list_snapshot(&self) -> ReminderListState {
        self.list().clone()
    }

    pub fn toast_snapshot(&self) -> ToastState {
        self.toast().clone()
    }

    pub fn show_toast(&self, message: impl Into<String>, severity: Severity) {
        self.toast().show(message, severity);
    }

    pub fn hide_toast(&self) {
        self.toast().hide();
    }

    // -- Session --

    /// Guard for protected views and actions.
    pub fn require_authenticated(&self) -> Result<(), ReminderError> {
        if self.session().is_authenticated() {
            Ok(())
        } else {
            Err(ReminderError::NotAuthenticated)
        }
    }

    /// Restores a session from the persisted token. Without a token nothing
    /// is sent. A token the server does not accept is removed.
    pub async fn bootstrap(&self) -> Result<AuthPhase, ReminderError> {
        let Some(token) = self.tokens.load()? else {
            return Ok(self.session().phase);
        };
        {
            let session = self.session();
            if session.user.is_some() {
                return Ok(session.phase);
            }
        }

        self.client.set_token(&token);
        self.session().restore_started();
        let user = match self.client.me().await {
            Ok(resp) => resp.data.user,
            Err(e) => {
                tracing::warn!("Stored token rejected: {}", e);
                None
            }
        };

        match user {
            Some(user) => {
                tracing::info!("Session restored for {}", user.email);
                self.session().restored(user);
                Ok(AuthPhase::Authenticated)
            }
            None => {
                self.client.clear_token();
                self.session().restore_failed();
                self.tokens.clear()?;
                Ok(AuthPhase::Anonymous)
            }
        }
    }

    /// Logs in and persists the access token. The profile is fetched as a
    /// follow-up; if that fails the session starts with an empty user.
    ///
    /// A previously stored token is only replaced once the new login
    /// succeeded; a failed attempt leaves it on disk.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ReminderError> {
        let credentials = validation::validate_login(email, password)?;
        self.session().login_started();

        let resp = match self.client.login(&credentials).await {
            Ok(resp) => resp,
            Err(e) => return Err(self.fail_login(messages::login_error_message(&e))),
        };
        let Some(token) = resp.access_token() else {
            tracing::warn!("Login response carried no access token");
            return Err(self.fail_login(messages::LOGIN_FAILED.to_string()));
        };
        if let Err(e) = self.tokens.save(token) {
            tracing::error!("Failed to persist token: {}", e);
            return Err(self.fail_login(messages::LOGIN_FAILED.to_string()));
        }
        self.client.set_token(token);

        let user = match self.client.me().await {
            Ok(resp) => resp.data.user.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to fetch user details after login: {}", e);
                User::default()
            }
        };

        tracing::info!("Logged in as {}", credentials.email);
        self.session().login_succeeded(user.clone());
        self.show_toast(messages::LOGIN_SUCCESS, Severity::Success);
        Ok(user)
    }

    fn fail_login(&self, message: String) -> ReminderError {
        self.session().login_failed(message.clone());
        self.show_toast(message.clone(), Severity::Error);
        ReminderError::Action(message)
    }

    /// Creates an account. Does not log in.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), ReminderError> {
        let registration =
            validation::validate_registration(email, password, first_name, last_name)?;
        match self.client.register(&registration).await {
            Ok(_) => {
                tracing::info!("Registered {}", registration.email);
                self.show_toast(messages::REGISTER_SUCCESS, Severity::Success);
                Ok(())
            }
            Err(e) => {
                let message = messages::register_error_message(&e);
                self.show_toast(message.clone(), Severity::Error);
                Err(ReminderError::Action(message))
            }
        }
    }

    /// Updates the profile and merges the result into the held user. Fields
    /// the server does not echo back keep the submitted values.
    pub async fn update_profile(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, ReminderError> {
        self.require_authenticated()?;
        let update = validation::validate_profile(first_name, last_name)?;
        match self.client.update_profile(&update).await {
            Ok(resp) => {
                let fields = resp.data.unwrap_or_default();
                let first = fields
                    .first_name
                    .filter(|s| !s.is_empty())
                    .unwrap_or(update.first_name);
                let last = fields
                    .last_name
                    .filter(|s| !s.is_empty())
                    .unwrap_or(update.last_name);
                let user = {
                    let mut session = self.session();
                    session.profile_updated(&first, &last);
                    session.user.clone().unwrap_or_default()
                };
                self.show_toast(messages::PROFILE_UPDATED, Severity::Success);
                Ok(user)
            }
            Err(e) => {
                let message = messages::action_error_message(&e, messages::PROFILE_FAILED);
                self.show_toast(message.clone(), Severity::Error);
                Err(ReminderError::Action(message))
            }
        }
    }

    /// Ends the session: removes the persisted token and resets the session
    /// and list slices. The in-memory state is reset even if removing the
    /// token fails.
    pub fn logout(&self) -> Result<(), ReminderError> {
        let cleared = self.tokens.clear();
        self.client.clear_token();
        self.session().logged_out();
        self.list().reset();
        tracing::info!("Logged out");
        cleared
    }

    // -- Reminder list --

    /// Seeds the list slice with filters and pagination from a previous run,
    /// without fetching.
    pub fn restore_list(&self, filters: Filters, pagination: Pagination) {
        self.list().restore(filters, pagination);
    }

    /// Fetches the page described by the current filters. Returns
    /// [`Applied::Stale`] when a newer fetch superseded this one.
    pub async fn fetch_reminders(&self) -> Result<Applied, ReminderError> {
        self.require_authenticated()?;
        let (ticket, limit) = {
            let mut list = self.list();
            (list.begin_fetch(), list.page_size())
        };
        let query = ticket.filters.to_query(limit);
        tracing::debug!(
            "Fetching reminders #{}: page {} search {:?} upcoming {}",
            ticket.seq,
            ticket.filters.current_page,
            ticket.filters.search,
            ticket.filters.upcoming_only
        );

        match self.client.list_reminders(&query).await {
            Ok(resp) => {
                let applied = self.list().apply_page(&ticket, resp.data);
                if applied == Applied::Stale {
                    tracing::warn!("Discarded stale reminder page for request #{}", ticket.seq);
                }
                Ok(applied)
            }
            Err(e) => {
                let message = messages::action_error_message(&e, messages::FETCH_FAILED);
                let applied = self.list().apply_error(&ticket, message.clone());
                match applied {
                    Applied::Fresh => Err(ReminderError::Action(message)),
                    Applied::Stale => {
                        tracing::warn!("Discarded stale error for request #{}", ticket.seq);
                        Ok(Applied::Stale)
                    }
                }
            }
        }
    }

    /// Applies a filter change and, if the filters actually changed, issues
    /// exactly one fetch. Returns `None` when nothing was fetched.
    pub async fn apply_filter_change(
        &self,
        change: FilterChange,
    ) -> Result<Option<Applied>, ReminderError> {
        self.apply_filter_changes([change]).await
    }

    /// Applies several changes as a single intent. Every change is validated
    /// before any is applied, and at most one fetch is issued.
    pub async fn apply_filter_changes<I>(&self, changes: I) -> Result<Option<Applied>, ReminderError>
    where
        I: IntoIterator<Item = FilterChange>,
    {
        let changes = changes
            .into_iter()
            .map(normalize_change)
            .collect::<Result<Vec<_>, _>>()?;
        let changed = {
            let mut list = self.list();
            let mut changed = false;
            for change in changes {
                changed |= list.apply(change);
            }
            changed
        };
        if !changed {
            tracing::debug!("Filter change refused or unchanged; not fetching");
            return Ok(None);
        }
        self.fetch_reminders().await.map(Some)
    }

    pub fn set_editing(&self, reminder: Option<Reminder>) {
        self.list().set_editing(reminder);
    }

    pub fn clear_editing(&self) {
        self.list().clear_editing();
    }

    pub fn clear_error(&self) {
        self.list().clear_error();
    }

    // -- Mutations --

    pub async fn create_reminder(
        &self,
        title: &str,
        description: &str,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<(), ReminderError> {
        self.require_authenticated()?;
        let input = validation::validate_reminder(title, description, scheduled_at, Utc::now())?;
        self.list().mutation_started();
        let result = self.client.create_reminder(&input).await;
        match result {
            Ok(resp) => {
                let message = resp
                    .message
                    .unwrap_or_else(|| messages::CREATE_SUCCESS.to_string());
                self.mutation_succeeded(message).await;
                Ok(())
            }
            Err(e) => Err(self.mutation_failed(&e, messages::CREATE_FAILED)),
        }
    }

    pub async fn update_reminder(
        &self,
        id: &str,
        title: &str,
        description: &str,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<(), ReminderError> {
        self.require_authenticated()?;
        let input = validation::validate_reminder(title, description, scheduled_at, Utc::now())?;
        self.list().mutation_started();
        let result = self.client.update_reminder(id, &input).await;
        match result {
            Ok(_) => {
                self.list().clear_editing();
                self.mutation_succeeded(messages::UPDATE_SUCCESS.to_string())
                    .await;
                Ok(())
            }
            Err(e) => Err(self.mutation_failed(&e, messages::UPDATE_FAILED)),
        }
    }

    /// First half of a delete: names what is about to be removed. Sends nothing.
    pub fn request_delete(&self, id: &str) -> PendingDelete {
        let title = self
            .list()
            .reminders
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.title.clone());
        PendingDelete {
            id: id.to_string(),
            title,
        }
    }

    /// Second half of a delete, once the user confirmed.
    pub async fn delete_reminder(&self, pending: PendingDelete) -> Result<(), ReminderError> {
        self.require_authenticated()?;
        self.list().mutation_started();
        let result = self.client.delete_reminder(&pending.id).await;
        match result {
            Ok(_) => {
                self.mutation_succeeded(messages::DELETE_SUCCESS.to_string())
                    .await;
                Ok(())
            }
            Err(e) => Err(self.mutation_failed(&e, messages::DELETE_FAILED)),
        }
    }

    /// Success toast, then one re-fetch of the current filtered page. The
    /// list is never patched locally.
    async fn mutation_succeeded(&self, message: String) {
        self.list().mutation_succeeded();
        self.show_toast(message, Severity::Success);
        if let Err(e) = self.fetch_reminders().await {
            tracing::warn!("Refresh after mutation failed: {}", e);
        }
    }

    fn mutation_failed(&self, err: &reminder_api::Error, fallback: &str) -> ReminderError {
        let message = messages::action_error_message(err, fallback);
        self.list().mutation_failed(message.clone());
        self.show_toast(message.clone(), Severity::Error);
        ReminderError::Action(message)
    }
}

fn normalize_change(change: FilterChange) -> Result<FilterChange, ReminderError> {
    Ok(match change {
        FilterChange::Search(text) => {
            let search = validation::validate_search(&text)?;
            if search.is_empty() {
                FilterChange::ClearSearch
            } else {
                FilterChange::Search(search)
            }
        }
        FilterChange::Page(page) => FilterChange::Page(validation::validate_page(page)?),
        other => other,
    })
}
