//! Authentication state machine.
//!
//! A session is in exactly one [`AuthPhase`]; whether the user counts as
//! authenticated is read from the phase alone, never from token presence
//! or from whether a user object happens to be loaded.

use reminder_api::types::User;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthPhase {
    #[default]
    Anonymous,
    /// A login or a token restore is in flight.
    Authenticating,
    Authenticated,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub phase: AuthPhase,
    pub user: Option<User>,
    pub error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    pub fn loading(&self) -> bool {
        self.phase == AuthPhase::Authenticating
    }

    pub fn login_started(&mut self) {
        self.phase = AuthPhase::Authenticating;
        self.error = None;
    }

    /// `user` may be empty when the profile lookup after login failed.
    pub fn login_succeeded(&mut self, user: User) {
        self.phase = AuthPhase::Authenticated;
        self.user = Some(user);
        self.error = None;
    }

    pub fn login_failed(&mut self, message: impl Into<String>) {
        self.phase = AuthPhase::Anonymous;
        self.user = None;
        self.error = Some(message.into());
    }

    pub fn restore_started(&mut self) {
        self.phase = AuthPhase::Authenticating;
        self.error = None;
    }

    pub fn restored(&mut self, user: User) {
        self.phase = AuthPhase::Authenticated;
        self.user = Some(user);
    }

    pub fn restore_failed(&mut self) {
        self.phase = AuthPhase::Anonymous;
        self.user = None;
    }

    pub fn logged_out(&mut self) {
        *self = SessionState::default();
    }

    /// Merges new names into the held user. No-op without a user.
    pub fn profile_updated(&mut self, first_name: &str, last_name: &str) {
        if let Some(user) = self.user.as_mut() {
            user.first_name = first_name.to_string();
            user.last_name = last_name.to_string();
        }
    }
}
