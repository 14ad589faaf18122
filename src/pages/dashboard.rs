//! Dashboard page: statistics, recent work orders, and upcoming services.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It refetches whenever the date
//! range changes or the user asks for a refresh. Each fetch cancels the one
//! before it, and leaving the page cancels whatever is still in flight, so a
//! stale response never lands in state.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::loading::Spinner;
use crate::components::stat_card::StatCard;
use crate::net::client::{Canceller, cancel_pair};
use crate::net::types::{RecordId, UpcomingService, WorkOrderSummary};
use crate::state::auth::AuthContext;
use crate::state::dashboard::DashboardState;
use crate::util::dates::{format_service_date, today_iso};

pub fn work_order_href(id: &RecordId) -> String {
    format!("/work-orders/{id}")
}

pub fn status_badge_class(status: &str) -> &'static str {
    if status.eq_ignore_ascii_case("completed") {
        "status-badge status-badge--completed"
    } else {
        "status-badge status-badge--open"
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<AuthContext>().api().clone());
    let state = RwSignal::new(DashboardState::new(&today_iso()));
    let inflight = StoredValue::new(None::<Canceller>);

    let load = move || {
        if let Some(previous) = inflight.get_value() {
            previous.cancel();
        }
        let (canceller, signal) = cancel_pair();
        inflight.set_value(Some(canceller));
        state.update(DashboardState::begin_fetch);
        let range = state.with_untracked(|s| s.range.clone());

        #[cfg(feature = "csr")]
        {
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::fetch_dashboard(&api, &range.start, &range.end, Some(signal)).await;
                state.update(|s| s.apply_result(result));
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (api, range, signal);
        }
    };

    // Refetch only when the range itself changes, not on every state write.
    let range = Memo::new(move |_| state.with(|s| s.range.clone()));
    Effect::new(move |_| {
        range.track();
        load();
    });

    on_cleanup(move || {
        if let Some(Some(canceller)) = inflight.try_get_value() {
            canceller.cancel();
        }
    });

    move || {
        let current = state.get();
        if current.loading {
            return view! {
                <div class="dashboard dashboard--loading" data-testid="dashboard-loading">
                    <Spinner/>
                </div>
            }
            .into_any();
        }
        if let Some(error) = current.error {
            return view! {
                <div class="dashboard dashboard--error">
                    <p class="dashboard__error">{error}</p>
                    <button class="btn btn--primary" on:click=move |_| load()>
                        "Retry"
                    </button>
                </div>
            }
            .into_any();
        }

        let data = current.data.unwrap_or_default();
        let stats = data.statistics;
        view! {
            <div class="dashboard">
                <header class="dashboard__header">
                    <h1>"Dashboard"</h1>
                    <div class="dashboard__controls">
                        <input
                            type="date"
                            class="dashboard__date"
                            data-testid="date-range-start"
                            prop:value=current.range.start
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.range.start = value);
                            }
                        />
                        <span>"to"</span>
                        <input
                            type="date"
                            class="dashboard__date"
                            data-testid="date-range-end"
                            prop:value=current.range.end
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.range.end = value);
                            }
                        />
                        <button
                            class="btn btn--primary"
                            data-testid="refresh-button"
                            title="Refresh"
                            on:click=move |_| load()
                        >
                            "↻"
                        </button>
                    </div>
                </header>

                <section class="dashboard__stats">
                    <StatCard title="Total Work Orders" value=stats.total_work_orders/>
                    <StatCard title="Pending Services" value=stats.pending_services/>
                    <StatCard title="Completed Today" value=stats.completed_today/>
                    <StatCard title="Active Customers" value=stats.active_customers/>
                </section>

                <section class="dashboard__lists">
                    <div class="panel">
                        <h2>"Recent Work Orders"</h2>
                        <ul class="panel__list">
                            {data.recent_work_orders.into_iter().map(work_order_row).collect_view()}
                        </ul>
                    </div>
                    <div class="panel">
                        <h2>"Upcoming Services"</h2>
                        <ul class="panel__list">
                            {data.upcoming_services.into_iter().map(upcoming_row).collect_view()}
                        </ul>
                    </div>
                </section>
            </div>
        }
        .into_any()
    }
}

fn work_order_row(order: WorkOrderSummary) -> impl IntoView {
    let badge = status_badge_class(&order.status);
    view! {
        <li>
            <a class="panel__item panel__item--link" href=work_order_href(&order.id)>
                <div class="panel__row">
                    <span class="panel__title">{order.title}</span>
                    <span class=badge>{order.status}</span>
                </div>
                <p class="panel__meta">{order.customer}</p>
            </a>
        </li>
    }
}

fn upcoming_row(service: UpcomingService) -> impl IntoView {
    view! {
        <li class="panel__item">
            <div class="panel__row">
                <span class="panel__title">{service.kind}</span>
                <span class="panel__date">{format_service_date(&service.date)}</span>
            </div>
            <p class="panel__meta">{service.customer}</p>
        </li>
    }
}
