use leptos::prelude::*;

/// Centered spinner used while a page's first fetch is outstanding.
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="spinner" role="status" aria-label="Loading">
            <span class="spinner__ring"></span>
        </div>
    }
}
