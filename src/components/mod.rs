//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render console chrome and shared widgets while reading/writing
//! state from Leptos context providers.

pub mod layout;
pub mod loading;
pub mod stat_card;
