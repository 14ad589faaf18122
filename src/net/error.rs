//! Error taxonomy for backend calls.
//!
//! ERROR HANDLING
//! ==============
//! `SessionExpired` is already handled globally by the time a caller sees it
//! (store cleared, browser redirected); callers only need to stop. A
//! `Cancelled` result means the caller gave up on the call and must not be
//! surfaced to the user.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request cancelled")]
    Cancelled,

    #[error("session expired")]
    SessionExpired,

    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("network error: {0}")]
    Transport(String),

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the caller abandoned the call.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
