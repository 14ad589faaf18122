//! Static section pages that have no backend data yet.

use leptos::prelude::*;

#[component]
fn SectionPlaceholder(title: &'static str, blurb: &'static str) -> impl IntoView {
    view! {
        <div class="section-page">
            <h1>{title}</h1>
            <p class="section-page__blurb">{blurb}</p>
            <div class="section-page__placeholder">{format!("{title} content coming soon.")}</div>
        </div>
    }
}

#[component]
pub fn ServicesPage() -> impl IntoView {
    view! { <SectionPlaceholder title="Services" blurb="Manage your services here."/> }
}

#[component]
pub fn UsersPage() -> impl IntoView {
    view! { <SectionPlaceholder title="Users" blurb="Manage your users here."/> }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! { <SectionPlaceholder title="Settings" blurb="Configure your application settings here."/> }
}
