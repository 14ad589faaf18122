//! Durable mirror of the bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth context owns the session; this store only persists the token so
//! a reload can pick it up again. Writers are the auth context (login,
//! startup, logout) and the HTTP client's expiry path. There is no expiry
//! logic here: the backend is the only judge of token validity.
//!
//! TRADE-OFFS
//! ==========
//! `LocalStorageSession` is browser-only; outside the `csr` build it reads
//! nothing and drops writes so native builds stay deterministic.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Mutex, PoisonError};

/// Storage key holding the raw token string.
pub const TOKEN_KEY: &str = "token";

pub trait SessionStore: Send + Sync {
    /// Current token, if one is stored. Blank values count as absent.
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str);
    fn clear(&self);
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|token| !token.trim().is_empty())
}

/// `window.localStorage`-backed store scoped to the page origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageSession;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionStore for LocalStorageSession {
    fn read(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            non_blank(local_storage()?.get_item(TOKEN_KEY).ok().flatten())
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn write(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(TOKEN_KEY, token).is_err() {
                    log::warn!("failed to persist session token");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                if storage.remove_item(TOKEN_KEY).is_err() {
                    log::warn!("failed to remove session token");
                }
            }
        }
    }
}

/// In-process store for native builds and tests.
#[derive(Debug, Default)]
pub struct MemorySession {
    token: Mutex<Option<String>>,
}

impl MemorySession {
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }
}

impl SessionStore for MemorySession {
    fn read(&self) -> Option<String> {
        non_blank(self.token.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn write(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
