//! Fallback screen for unmatched routes.

use leptos::prelude::*;

use crate::config::HOME_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1 class="not-found__code">"404"</h1>
            <p class="not-found__message">"Page not found"</p>
            <a class="btn btn--primary" href=HOME_PATH>
                "Return to Dashboard"
            </a>
        </div>
    }
}
