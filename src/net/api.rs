//! Named backend endpoints.
//!
//! Every console call goes through [`ApiClient`], so credentials and session
//! expiry are handled before results reach these helpers. The admin filter
//! endpoints are the exception: they live on the server-rendered admin site,
//! authenticate with its session cookie, and are called over a bare
//! [`Transport`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::client::{ApiClient, CancelSignal, RequestOptions, join_url};
use super::error::ApiError;
use super::transport::{ApiRequest, Method, Transport};
use super::types::{
    DashboardData, EntitlementOption, InstrumentOption, LoginRequest, LoginResponse, MeResponse, User,
    WorkOrderDetail,
};

pub const LOGIN_ENDPOINT: &str = "/auth/login/";
pub const CURRENT_USER_ENDPOINT: &str = "/auth/me/";
pub const DASHBOARD_ENDPOINT: &str = "/dashboard";
pub const INSTRUMENT_FILTER_ENDPOINT: &str = "/admin/service/instrument/ajax/filter/";
pub const ENTITLEMENT_FILTER_ENDPOINT: &str = "/admin/service/entitlement/ajax/filter/";

fn work_order_endpoint(id: &str) -> String {
    format!("/work-orders/{id}/")
}

fn with_cancel(options: RequestOptions, cancel: Option<CancelSignal>) -> RequestOptions {
    match cancel {
        Some(signal) => options.cancel_with(signal),
        None => options,
    }
}

/// Exchange credentials for a token and identity via `POST /auth/login/`.
///
/// # Errors
///
/// A refused login, 401 included, is [`ApiError::Status`] carrying the
/// backend's message; the current session is left alone. Other failures
/// propagate from the pipeline or from decoding.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let resp = api
        .post(
            LOGIN_ENDPOINT,
            &LoginRequest { email, password },
            RequestOptions::default().credential_exchange(),
        )
        .await?;
    resp.json()
}

/// Validate the stored token and fetch its identity via `GET /auth/me/`.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the pipeline or from decoding.
pub async fn fetch_current_user(api: &ApiClient) -> Result<User, ApiError> {
    let resp = api.get(CURRENT_USER_ENDPOINT, RequestOptions::default()).await?;
    Ok(resp.json::<MeResponse>()?.into_user())
}

/// Fetch dashboard aggregates for an inclusive `YYYY-MM-DD` date range.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the pipeline or from decoding.
pub async fn fetch_dashboard(
    api: &ApiClient,
    start_date: &str,
    end_date: &str,
    cancel: Option<CancelSignal>,
) -> Result<DashboardData, ApiError> {
    let options = RequestOptions::default()
        .query("startDate", start_date)
        .query("endDate", end_date);
    let resp = api.get(DASHBOARD_ENDPOINT, with_cancel(options, cancel)).await?;
    resp.json()
}

/// Fetch one work order.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the pipeline or from decoding.
pub async fn fetch_work_order(
    api: &ApiClient,
    id: &str,
    cancel: Option<CancelSignal>,
) -> Result<WorkOrderDetail, ApiError> {
    let resp = api
        .get(&work_order_endpoint(id), with_cancel(RequestOptions::default(), cancel))
        .await?;
    resp.json()
}

async fn admin_get<T: serde::de::DeserializeOwned>(
    transport: &dyn Transport,
    origin: &str,
    endpoint: &str,
    param: (&str, &str),
) -> Result<T, ApiError> {
    let mut request = ApiRequest::new(Method::Get, join_url(origin, endpoint));
    request.query.push((param.0.to_owned(), param.1.to_owned()));
    let resp = transport.send(request).await?;
    if !resp.is_success() {
        return Err(ApiError::Status { status: resp.status, message: resp.error_message() });
    }
    resp.json()
}

/// Instruments owned by a customer, from the admin filter endpoint.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, non-2xx status, or bad JSON.
pub async fn filter_instruments(
    transport: &dyn Transport,
    origin: &str,
    customer_id: &str,
) -> Result<Vec<InstrumentOption>, ApiError> {
    admin_get(transport, origin, INSTRUMENT_FILTER_ENDPOINT, ("customer", customer_id)).await
}

/// Active entitlements on an instrument, from the admin filter endpoint.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, non-2xx status, or bad JSON.
pub async fn filter_entitlements(
    transport: &dyn Transport,
    origin: &str,
    instrument_id: &str,
) -> Result<Vec<EntitlementOption>, ApiError> {
    admin_get(transport, origin, ENTITLEMENT_FILTER_ENDPOINT, ("instrument", instrument_id)).await
}
