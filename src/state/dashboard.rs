//! Dashboard page state.
//!
//! ERROR HANDLING
//! ==============
//! Only ordinary failures reach the inline error banner. A cancelled fetch
//! was superseded or abandoned and leaves state alone; an expired session is
//! already being handled by the HTTP client's redirect.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use crate::net::error::ApiError;
use crate::net::types::DashboardData;

pub const DASHBOARD_LOAD_ERROR: &str = "Error loading dashboard data. Please try again.";

/// Inclusive `YYYY-MM-DD` date range sent to the dashboard endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn single_day(day: &str) -> Self {
        Self { start: day.to_owned(), end: day.to_owned() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardState {
    pub range: DateRange,
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<DashboardData>,
}

impl DashboardState {
    /// Fresh state covering `today`, loading until the first fetch lands.
    pub fn new(today: &str) -> Self {
        Self { range: DateRange::single_day(today), loading: true, error: None, data: None }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn apply_result(&mut self, result: Result<DashboardData, ApiError>) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.loading = false;
            }
            Err(ApiError::Cancelled) => {}
            Err(ApiError::SessionExpired) => self.loading = false,
            Err(err) => {
                log::warn!("dashboard fetch failed: {err}");
                self.error = Some(DASHBOARD_LOAD_ERROR.to_owned());
                self.loading = false;
            }
        }
    }
}
