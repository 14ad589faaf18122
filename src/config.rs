//! Build-time configuration for the console.
//!
//! The browser build has no process environment, so the API base URL is
//! captured from `API_URL` when the crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Route the HTTP layer sends the browser to when the backend rejects the session.
pub const LOGIN_PATH: &str = "/login";

/// Route a successful login lands on.
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Build config from the compile-time `API_URL` override.
    pub fn from_env() -> Self {
        Self::from_override(option_env!("API_URL"))
    }

    /// Build config from an optional base URL override.
    ///
    /// Blank overrides fall back to [`DEFAULT_API_BASE_URL`]; trailing
    /// slashes are dropped so paths can always start with `/`.
    pub fn from_override(raw: Option<&str>) -> Self {
        let base_url = raw
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        Self { base_url }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_override(None)
    }
}
