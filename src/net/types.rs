//! Wire DTOs for the REST backend.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON. Dashboard payloads use camelCase,
//! record payloads use snake_case; optional fields default so a sparse
//! response still renders.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primary key as sent by the backend: usually an integer, sometimes a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Identity payload for the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    /// Best human-readable label: full name, then username, then email.
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => self.email.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Token-validation response: either `{ "user": {...} }` or the bare user.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum MeResponse {
    Wrapped { user: User },
    Bare(User),
}

impl MeResponse {
    pub fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default)]
    pub recent_work_orders: Vec<WorkOrderSummary>,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub upcoming_services: Vec<UpcomingService>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_work_orders: u64,
    pub pending_services: u64,
    pub completed_today: u64,
    pub active_customers: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WorkOrderSummary {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub customer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UpcomingService {
    pub id: RecordId,
    #[serde(default)]
    pub date: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub customer: String,
}

/// Full work-order record for the detail page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkOrderDetail {
    pub id: RecordId,
    pub customer_name: Option<String>,
    pub instrument_serial: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub status_display: Option<String>,
    pub created_by_name: Option<String>,
    pub assigned_to_name: Option<String>,
    pub created_at: Option<String>,
    pub has_reports: bool,
}

impl Default for WorkOrderDetail {
    fn default() -> Self {
        Self {
            id: RecordId::Number(0),
            customer_name: None,
            instrument_serial: None,
            description: None,
            status: String::new(),
            status_display: None,
            created_by_name: None,
            assigned_to_name: None,
            created_at: None,
            has_reports: false,
        }
    }
}

/// Row returned by the admin instrument filter endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InstrumentOption {
    pub id: RecordId,
    #[serde(default)]
    pub serial_number: String,
}

/// Row returned by the admin entitlement filter endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EntitlementOption {
    pub id: RecordId,
    #[serde(default)]
    pub entitlement_type: String,
    #[serde(default)]
    pub remaining: i64,
}
