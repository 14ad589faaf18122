//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::layout::Layout;
use crate::config::ApiConfig;
use crate::net::client::ApiClient;
use crate::pages::{
    dashboard::DashboardPage,
    login::LoginPage,
    not_found::NotFoundPage,
    placeholder::{ServicesPage, SettingsPage, UsersPage},
    work_order::WorkOrderPage,
};
use crate::state::{auth::AuthContext, ui::UiState};
use crate::util::auth::RequireAuth;
use crate::util::theme;

/// Root application component.
///
/// Provides the API client, auth context, and UI state, starts the stored
/// session check, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api = ApiClient::browser(ApiConfig::from_env());
    let auth = AuthContext::new(api.clone());
    let initial_theme = theme::read_preference();
    theme::apply(initial_theme);
    let ui = RwSignal::new(UiState::with_theme(initial_theme));

    provide_context(api);
    provide_context(auth.clone());
    provide_context(ui);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move { auth.init().await });
    #[cfg(not(feature = "csr"))]
    let _ = auth;

    view! {
        <Title text="Service Manager"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route
                    path=StaticSegment("")
                    view=|| view! { <RequireAuth><Layout><DashboardPage/></Layout></RequireAuth> }
                />
                <Route
                    path=StaticSegment("services")
                    view=|| view! { <RequireAuth><Layout><ServicesPage/></Layout></RequireAuth> }
                />
                <Route
                    path=StaticSegment("users")
                    view=|| view! { <RequireAuth><Layout><UsersPage/></Layout></RequireAuth> }
                />
                <Route
                    path=StaticSegment("settings")
                    view=|| view! { <RequireAuth><Layout><SettingsPage/></Layout></RequireAuth> }
                />
                <Route
                    path=(StaticSegment("work-orders"), ParamSegment("id"))
                    view=|| view! { <RequireAuth><Layout><WorkOrderPage/></Layout></RequireAuth> }
                />
            </Routes>
        </Router>
    }
}
