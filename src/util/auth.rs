//! Route guard for authenticated views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route wraps its page in [`RequireAuth`], so the loading
//! placeholder, login redirect, and content decisions are made in one place.
//! The guard holds no state of its own; it re-evaluates whenever the auth
//! signal changes, including a background logout after a 401.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::config::LOGIN_PATH;
use crate::state::auth::{AuthContext, AuthState};

/// What a guarded route shows for a given auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuardOutcome {
    Loading,
    Redirect,
    Render,
}

pub fn guard_outcome(state: &AuthState) -> GuardOutcome {
    if state.loading() {
        GuardOutcome::Loading
    } else if state.is_authenticated() {
        GuardOutcome::Render
    } else {
        GuardOutcome::Redirect
    }
}

/// Render `children` only for an authenticated session.
///
/// Shows a loading placeholder during the startup token check and performs
/// an in-app redirect to `/login` once the session is known to be absent.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AuthContext>().state;
    let outcome = Memo::new(move |_| state.with(guard_outcome));

    move || match outcome.get() {
        GuardOutcome::Loading => view! {
            <div class="route-loading" role="status">"Loading..."</div>
        }
        .into_any(),
        GuardOutcome::Redirect => view! { <Redirect path=LOGIN_PATH/> }.into_any(),
        GuardOutcome::Render => children().into_any(),
    }
}
