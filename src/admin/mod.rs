//! Enhancement scripts for the server-rendered admin site.
//!
//! SYSTEM CONTEXT
//! ==============
//! The admin pages are rendered by the backend and load this crate's WASM
//! bundle only for two small behaviors: the light/dark toggle and the
//! customer → instrument → entitlement cascade on the work-order form. Each
//! is a separate `wasm_bindgen` entry point so a page wires only what it
//! needs.

pub mod theme_toggle;
pub mod workorder_filters;
