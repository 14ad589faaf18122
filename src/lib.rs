//! # service-manager
//!
//! Leptos + WASM administration console for the service-management backend.
//!
//! This crate contains the single-page dashboard (login, dashboard, work
//! orders, users, services, settings), the authenticated REST pipeline it
//! talks through, and the two small enhancement scripts loaded by the
//! server-rendered admin pages (theme toggle and cascading work-order
//! filters).

pub mod admin;
pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Install the console logger and panic hook. Safe to call more than once.
#[cfg(feature = "csr")]
pub(crate) fn init_logging() {
    console_error_panic_hook::set_once();
    // A second entry point on the same page finds the logger already set.
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Mount the single-page console onto `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn mount() {
    init_logging();
    leptos::mount::mount_to_body(app::App);
}
