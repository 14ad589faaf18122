//! Read-only work order detail, reached from the dashboard's recent list.
//!
//! The fetch is keyed by the `:id` route param and cancelled when the id
//! changes or the page unmounts.

#[cfg(test)]
#[path = "work_order_test.rs"]
mod work_order_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::loading::Spinner;
use crate::net::client::{Canceller, cancel_pair};
use crate::net::error::ApiError;
use crate::net::types::WorkOrderDetail;
use crate::state::auth::AuthContext;
use crate::util::dates::format_service_date;

pub const WORK_ORDER_LOAD_ERROR: &str = "Error loading work order. Please try again.";

const NOT_SET: &str = "-";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkOrderView {
    pub loading: bool,
    pub error: Option<String>,
    pub detail: Option<WorkOrderDetail>,
}

impl WorkOrderView {
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
        self.detail = None;
    }

    pub fn apply_result(&mut self, result: Result<WorkOrderDetail, ApiError>) {
        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.loading = false;
            }
            Err(ApiError::Cancelled) => {}
            Err(ApiError::SessionExpired) => self.loading = false,
            Err(err) => {
                log::warn!("work order fetch failed: {err}");
                self.error = Some(WORK_ORDER_LOAD_ERROR.to_owned());
                self.loading = false;
            }
        }
    }
}

/// Label/value pairs shown in the detail table.
pub fn detail_rows(detail: &WorkOrderDetail) -> Vec<(&'static str, String)> {
    let or_unset = |value: &Option<String>| value.clone().filter(|v| !v.is_empty()).unwrap_or_else(|| NOT_SET.to_owned());
    let status = detail.status_display.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| detail.status.clone());
    vec![
        ("Customer", or_unset(&detail.customer_name)),
        ("Instrument", or_unset(&detail.instrument_serial)),
        ("Status", status),
        ("Created by", or_unset(&detail.created_by_name)),
        ("Assigned to", or_unset(&detail.assigned_to_name)),
        ("Created", detail.created_at.as_deref().map_or_else(|| NOT_SET.to_owned(), format_service_date)),
        ("Reports", if detail.has_reports { "Yes" } else { "No" }.to_owned()),
    ]
}

#[component]
pub fn WorkOrderPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<AuthContext>().api().clone());
    let params = use_params_map();
    let id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
    let view_state = RwSignal::new(WorkOrderView { loading: true, ..WorkOrderView::default() });
    let inflight = StoredValue::new(None::<Canceller>);

    Effect::new(move |_| {
        let id = id.get();
        if let Some(previous) = inflight.get_value() {
            previous.cancel();
        }
        let (canceller, signal) = cancel_pair();
        inflight.set_value(Some(canceller));
        view_state.update(WorkOrderView::begin_fetch);

        #[cfg(feature = "csr")]
        {
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::fetch_work_order(&api, &id, Some(signal)).await;
                view_state.update(|v| v.apply_result(result));
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (api, id, signal);
        }
    });

    on_cleanup(move || {
        if let Some(Some(canceller)) = inflight.try_get_value() {
            canceller.cancel();
        }
    });

    move || {
        let current = view_state.get();
        if current.loading {
            return view! { <Spinner/> }.into_any();
        }
        if let Some(error) = current.error {
            return view! { <p class="work-order__error">{error}</p> }.into_any();
        }
        let Some(detail) = current.detail else {
            return ().into_any();
        };
        let rows = detail_rows(&detail);
        view! {
            <div class="work-order">
                <a class="work-order__back" href="/">"← Dashboard"</a>
                <h1>{format!("Work Order #{}", detail.id)}</h1>
                <p class="work-order__description">{detail.description.unwrap_or_default()}</p>
                <dl class="work-order__fields">
                    {rows
                        .into_iter()
                        .map(|(label, value)| view! {
                            <dt>{label}</dt>
                            <dd>{value}</dd>
                        })
                        .collect_view()}
                </dl>
            </div>
        }
        .into_any()
    }
}
