//! Single-figure summary card for the dashboard statistics row.

use leptos::prelude::*;

#[component]
pub fn StatCard(title: &'static str, value: u64) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__title">{title}</span>
            <span class="stat-card__value">{value}</span>
        </div>
    }
}
