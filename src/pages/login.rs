//! Login page: email + password form backed by the auth context.
//!
//! Blank fields are caught here and never reach the backend. A credential
//! rejection shows the backend's message verbatim; any other failure shows
//! a generic message.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

#[cfg(feature = "csr")]
use crate::config::HOME_PATH;
use crate::net::error::ApiError;
use crate::state::auth::{AuthContext, LoginError};

pub const LOGIN_FAILED_MESSAGE: &str = "Failed to login";
pub const MISSING_FIELDS_MESSAGE: &str = "Email and password are required.";

/// Trim the email and require both fields.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), LoginError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(LoginError::Missing(MISSING_FIELDS_MESSAGE));
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Message shown under the form, or `None` when nothing should be shown.
pub fn login_error_message(err: &LoginError) -> Option<String> {
    match err {
        LoginError::Missing(message) => Some((*message).to_owned()),
        LoginError::Rejected(message) => Some(message.clone()),
        LoginError::Api(ApiError::Cancelled) => None,
        LoginError::Api(_) => Some(LOGIN_FAILED_MESSAGE.to_owned()),
    }
}

/// Controlled form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginForm {
    /// Start a submission, returning the credentials to send.
    ///
    /// Returns `None` while a previous submission is outstanding or when a
    /// required field is blank (the validation message is set instead).
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.submitting {
            return None;
        }
        match validate_login_input(&self.email, &self.password) {
            Ok(credentials) => {
                self.submitting = true;
                self.error = None;
                Some(credentials)
            }
            Err(err) => {
                self.error = login_error_message(&err);
                None
            }
        }
    }

    pub fn finish(&mut self, result: &Result<(), LoginError>) {
        self.submitting = false;
        self.error = result.as_ref().err().and_then(login_error_message);
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let form = RwSignal::new(LoginForm::default());
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some((email, password)) = form.try_update(LoginForm::begin_submit).flatten() else {
            return;
        };

        #[cfg(feature = "csr")]
        {
            let auth = auth.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = auth.login(&email, &password).await;
                form.update(|f| f.finish(&result));
                if result.is_ok() {
                    navigate(HOME_PATH, NavigateOptions::default());
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password, &auth, &navigate);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Service Manager"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit novalidate=true>
                    <label class="login-label" for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        required=true
                        placeholder="you@example.com"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.email = value);
                        }
                    />
                    <label class="login-label" for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        required=true
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.password = value);
                        }
                    />
                    <button
                        class="login-button"
                        type="submit"
                        disabled=move || form.with(|f| f.submitting)
                    >
                        {move || if form.with(|f| f.submitting) { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || form.with(|f| f.error.is_some())>
                    <p class="login-message login-message--error" role="alert">
                        {move || form.with(|f| f.error.clone().unwrap_or_default())}
                    </p>
                </Show>
            </div>
        </div>
    }
}
