//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and user-aware components to coordinate login
//! redirects and identity-dependent rendering. [`AuthContext`] is the only
//! runtime writer of the session besides the HTTP client's expiry path.
//!
//! LIFECYCLE
//! =========
//! `Initializing` → (`Authenticated` | `Unauthenticated`) once the startup
//! token check resolves, then back and forth through login/logout/expiry.
//! The state never re-enters `Initializing`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::User;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Initializing,
    Authenticated(User),
    Unauthenticated,
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub status: AuthStatus,
}

impl AuthState {
    pub fn authenticated(user: User) -> Self {
        Self { status: AuthStatus::Authenticated(user) }
    }

    pub fn unauthenticated() -> Self {
        Self { status: AuthStatus::Unauthenticated }
    }

    /// True only while the startup token check is outstanding.
    pub fn loading(&self) -> bool {
        matches!(self.status, AuthStatus::Initializing)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, AuthStatus::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match &self.status {
            AuthStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Apply the startup check's result.
    ///
    /// A state that already settled (a login finished first) is kept.
    #[must_use]
    pub fn settle_startup(self, result: AuthState) -> AuthState {
        if self.loading() { result } else { self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// A required field was blank; no request was made.
    #[error("{0}")]
    Missing(&'static str),

    /// The backend refused the credentials and said why.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { message: Some(message), .. } => Self::Rejected(message),
            other => Self::Api(other),
        }
    }
}

/// Validate the stored token against the backend.
///
/// Resolves to `Unauthenticated` immediately when nothing is stored. A
/// rejected token is removed from the store unless it was replaced while
/// the check was in flight.
pub async fn restore_session(api: &ApiClient) -> AuthState {
    let Some(token) = api.session().read() else {
        return AuthState::unauthenticated();
    };
    match api::fetch_current_user(api).await {
        Ok(user) => AuthState::authenticated(user),
        Err(err) => {
            log::warn!("stored session rejected: {err}");
            if api.session().read().as_deref() == Some(token.as_str()) {
                api.session().clear();
            }
            AuthState::unauthenticated()
        }
    }
}

/// Log in and persist the returned token.
///
/// # Errors
///
/// Returns [`LoginError::Rejected`] with the backend's message when the
/// credentials are refused, or [`LoginError::Api`] for everything else.
/// The session store is untouched on failure.
pub async fn sign_in(api: &ApiClient, email: &str, password: &str) -> Result<User, LoginError> {
    let resp = api::login(api, email, password).await?;
    api.session().write(&resp.token);
    log::info!("signed in as {}", resp.user.email);
    Ok(resp.user)
}

/// Drop the local session. No backend call is needed for this to succeed.
pub fn sign_out(api: &ApiClient) {
    api.session().clear();
}

/// Process-wide auth handle provided through Leptos context.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    api: ApiClient,
}

impl AuthContext {
    /// Create the context in `Initializing` and subscribe it to session expiry.
    pub fn new(api: ApiClient) -> Self {
        let state = RwSignal::new(AuthState::default());
        api.on_session_expired(move || state.set(AuthState::unauthenticated()));
        Self { state, api }
    }

    /// Run the startup token check. Call once, at application start.
    pub async fn init(&self) {
        let result = restore_session(&self.api).await;
        self.state.update(|current| {
            *current = std::mem::take(current).settle_startup(result);
        });
    }

    /// # Errors
    ///
    /// See [`sign_in`]. State is unchanged on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), LoginError> {
        let user = sign_in(&self.api, email, password).await?;
        self.state.set(AuthState::authenticated(user));
        Ok(())
    }

    pub fn logout(&self) {
        sign_out(&self.api);
        self.state.set(AuthState::unauthenticated());
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
