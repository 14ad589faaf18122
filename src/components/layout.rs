//! Authenticated console shell: sidebar navigation, header, and content.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded route renders inside [`Layout`]. The header carries the
//! signed-in user's name, the theme toggle, and sign-out; the sidebar
//! collapses behind a menu button on narrow screens.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::LOGIN_PATH;
use crate::net::types::User;
use crate::state::auth::AuthContext;
use crate::state::ui::UiState;
use crate::util::theme::{self, Theme};

/// Sidebar entries as `(label, href)`.
pub const NAV_ITEMS: [(&str, &str); 4] =
    [("Dashboard", "/"), ("Services", "/services"), ("Users", "/users"), ("Settings", "/settings")];

/// Whether `href` is the active section for `path`.
///
/// Work order detail pages belong to the dashboard section.
pub fn is_active_nav(path: &str, href: &str) -> bool {
    if href == "/" {
        return path == "/" || path.is_empty() || path.starts_with("/work-orders");
    }
    path == href || path.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
}

pub fn nav_link_class(path: &str, href: &str) -> &'static str {
    if is_active_nav(path, href) { "sidebar__link sidebar__link--active" } else { "sidebar__link" }
}

pub fn theme_toggle_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "☾",
        Theme::Dark => "☀",
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let ui = expect_context::<RwSignal<UiState>>();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let auth_state = auth.state;
    let user_name = move || auth_state.with(|s| s.user().map(User::display_name).unwrap_or_default());

    let on_logout = move |_| {
        auth.logout();
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <div class="layout" class:layout--menu-open=move || ui.with(|u| u.mobile_menu_open)>
            <aside class="sidebar">
                <div class="sidebar__title">"Service Manager"</div>
                <nav class="sidebar__nav">
                    {NAV_ITEMS
                        .into_iter()
                        .map(|(label, href)| {
                            view! {
                                <a
                                    href=href
                                    class=move || pathname.with(|path| nav_link_class(path, href))
                                    on:click=move |_| ui.update(|u| u.mobile_menu_open = false)
                                >
                                    {label}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
            </aside>

            <div class="layout__main">
                <header class="header">
                    <button
                        class="btn header__menu"
                        title="Toggle menu"
                        on:click=move |_| ui.update(|u| u.mobile_menu_open = !u.mobile_menu_open)
                    >
                        "☰"
                    </button>
                    <span class="header__spacer"></span>
                    <button
                        class="btn header__theme theme-toggle"
                        title="Toggle theme"
                        on:click=move |_| {
                            let next = theme::toggle(ui.with_untracked(|u| u.theme));
                            ui.update(|u| u.theme = next);
                        }
                    >
                        {move || theme_toggle_label(ui.with(|u| u.theme))}
                    </button>
                    <span class="header__user">{user_name}</span>
                    <button class="btn header__logout" on:click=on_logout title="Sign out">
                        "Sign out"
                    </button>
                </header>
                <main class="layout__content">{children()}</main>
            </div>
        </div>
    }
}
