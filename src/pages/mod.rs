//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates shared chrome
//! (sidebar, stat cards, spinners) to `components`.

pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod placeholder;
pub mod work_order;
