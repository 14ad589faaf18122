//! Cascading customer → instrument → entitlement selects on the admin
//! work-order form.
//!
//! DESIGN
//! ======
//! The cascade is computed as data first ([`on_customer_change`],
//! [`on_instrument_change`]) and only then written into the DOM, so the
//! option-building rules are testable without a browser. A `None` list in
//! the result means "leave this dropdown as it is".
//!
//! Every fetch takes a ticket from the dropdown it will write. A response
//! whose ticket is no longer the newest is dropped, so a slow answer for an
//! earlier selection never overwrites a later one.
//!
//! ERROR HANDLING
//! ==============
//! A failed filter request is logged and leaves the affected dropdowns
//! untouched. Nothing is retried.

#[cfg(test)]
#[path = "workorder_filters_test.rs"]
mod workorder_filters_test;

use std::cell::Cell;

use crate::net::api::{filter_entitlements, filter_instruments};
use crate::net::transport::Transport;
use crate::net::types::{EntitlementOption, InstrumentOption};

pub const EMPTY_OPTION_LABEL: &str = "---------";

pub const CUSTOMER_FIELD_ID: &str = "id_customer";
pub const INSTRUMENT_FIELD_ID: &str = "id_instrument";
pub const ENTITLEMENT_FIELD_ID: &str = "id_entitlement";
pub const CREATED_BY_FIELD_ID: &str = "id_created_by";

/// One `<option>` to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn placeholder() -> Self {
        Self { value: String::new(), label: EMPTY_OPTION_LABEL.to_owned(), selected: false }
    }
}

/// What to write into each dependent dropdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CascadeUpdate {
    pub instruments: Option<Vec<SelectOption>>,
    pub entitlements: Option<Vec<SelectOption>>,
}

/// Tickets for the fetches that may write one dropdown.
#[derive(Debug, Default)]
pub struct LatestRequest {
    issued: Cell<u64>,
}

impl LatestRequest {
    /// Start a fetch, superseding every earlier ticket.
    pub fn issue(&self) -> u64 {
        let ticket = self.issued.get() + 1;
        self.issued.set(ticket);
        ticket
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.issued.get() == ticket
    }
}

pub fn placeholder_options() -> Vec<SelectOption> {
    vec![SelectOption::placeholder()]
}

/// Placeholder followed by `(value, label)` items, re-selecting `current`
/// when it is still offered.
pub fn rebuild_options<I>(items: I, current: &str) -> Vec<SelectOption>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut options = placeholder_options();
    options.extend(items.into_iter().map(|(value, label)| {
        let selected = !current.is_empty() && value == current;
        SelectOption { value, label, selected }
    }));
    options
}

/// Value the select will report after `options` are rendered.
pub fn selected_value(options: &[SelectOption]) -> Option<&str> {
    options.iter().find(|o| o.selected).map(|o| o.value.as_str())
}

pub fn instrument_label(item: &InstrumentOption) -> String {
    item.serial_number.clone()
}

pub fn entitlement_label(item: &EntitlementOption) -> String {
    format!("{} ({} remaining)", item.entitlement_type, item.remaining)
}

/// Refresh the entitlement list for a newly selected instrument.
pub async fn on_instrument_change(
    transport: &dyn Transport,
    origin: &str,
    instrument: &str,
    current_entitlement: &str,
) -> Option<Vec<SelectOption>> {
    if instrument.is_empty() {
        return Some(placeholder_options());
    }
    match filter_entitlements(transport, origin, instrument).await {
        Ok(items) => Some(rebuild_options(
            items.iter().map(|item| (item.id.to_string(), entitlement_label(item))),
            current_entitlement,
        )),
        Err(err) => {
            log::warn!("entitlement filter failed for instrument {instrument}: {err}");
            None
        }
    }
}

/// Refresh instruments for a newly selected customer, then cascade into
/// entitlements for whichever instrument remains selected.
pub async fn on_customer_change(
    transport: &dyn Transport,
    origin: &str,
    customer: &str,
    current_instrument: &str,
    current_entitlement: &str,
) -> CascadeUpdate {
    if customer.is_empty() {
        return CascadeUpdate {
            instruments: Some(placeholder_options()),
            entitlements: Some(placeholder_options()),
        };
    }
    let items = match filter_instruments(transport, origin, customer).await {
        Ok(items) => items,
        Err(err) => {
            log::warn!("instrument filter failed for customer {customer}: {err}");
            return CascadeUpdate::default();
        }
    };
    let instruments = rebuild_options(
        items.iter().map(|item| (item.id.to_string(), instrument_label(item))),
        current_instrument,
    );
    let instrument = selected_value(&instruments).unwrap_or_default().to_owned();
    let entitlements = on_instrument_change(transport, origin, &instrument, current_entitlement).await;
    CascadeUpdate { instruments: Some(instruments), entitlements }
}

/// Wire the cascade onto the admin work-order form.
///
/// Makes the created-by field read-only and, when the form opens with a
/// customer already chosen, runs the cascade once.
#[cfg_attr(feature = "csr", wasm_bindgen::prelude::wasm_bindgen)]
pub fn init_workorder_filters() {
    #[cfg(feature = "csr")]
    browser::wire();
}

#[cfg(feature = "csr")]
mod browser {
    use std::rc::Rc;

    use wasm_bindgen::JsCast as _;
    use wasm_bindgen::closure::Closure;
    use web_sys::{Document, HtmlOptionElement, HtmlSelectElement};

    use super::{
        CREATED_BY_FIELD_ID, CUSTOMER_FIELD_ID, ENTITLEMENT_FIELD_ID, INSTRUMENT_FIELD_ID, LatestRequest,
        SelectOption, on_customer_change, on_instrument_change,
    };
    use crate::net::transport::FetchTransport;

    struct Fields {
        origin: String,
        customer: HtmlSelectElement,
        instrument: HtmlSelectElement,
        entitlement: HtmlSelectElement,
        instrument_requests: LatestRequest,
        entitlement_requests: LatestRequest,
    }

    fn select_by_id(doc: &Document, id: &str) -> Option<HtmlSelectElement> {
        doc.get_element_by_id(id)?.dyn_into().ok()
    }

    pub(super) fn wire() {
        crate::init_logging();
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(doc) = window.document() else {
            return;
        };
        if let Some(created_by) = doc.get_element_by_id(CREATED_BY_FIELD_ID) {
            let _ = created_by.set_attribute("readonly", "readonly");
        }
        let (Some(customer), Some(instrument), Some(entitlement)) = (
            select_by_id(&doc, CUSTOMER_FIELD_ID),
            select_by_id(&doc, INSTRUMENT_FIELD_ID),
            select_by_id(&doc, ENTITLEMENT_FIELD_ID),
        ) else {
            log::debug!("work-order filter fields not on this page");
            return;
        };
        let fields = Rc::new(Fields {
            origin: window.location().origin().unwrap_or_default(),
            customer,
            instrument,
            entitlement,
            instrument_requests: LatestRequest::default(),
            entitlement_requests: LatestRequest::default(),
        });

        listen_change(&fields.customer, {
            let fields = Rc::clone(&fields);
            move || wasm_bindgen_futures::spawn_local(refresh_from_customer(Rc::clone(&fields)))
        });
        listen_change(&fields.instrument, {
            let fields = Rc::clone(&fields);
            move || wasm_bindgen_futures::spawn_local(refresh_from_instrument(Rc::clone(&fields)))
        });

        if !fields.customer.value().is_empty() {
            wasm_bindgen_futures::spawn_local(refresh_from_customer(fields));
        }
    }

    async fn refresh_from_customer(fields: Rc<Fields>) {
        let instrument_ticket = fields.instrument_requests.issue();
        let entitlement_ticket = fields.entitlement_requests.issue();
        let update = on_customer_change(
            &FetchTransport,
            &fields.origin,
            &fields.customer.value(),
            &fields.instrument.value(),
            &fields.entitlement.value(),
        )
        .await;
        if let Some(options) = update.instruments.filter(|_| fields.instrument_requests.is_latest(instrument_ticket)) {
            fill(&fields.instrument, &options);
        }
        if let Some(options) = update.entitlements.filter(|_| fields.entitlement_requests.is_latest(entitlement_ticket)) {
            fill(&fields.entitlement, &options);
        }
    }

    async fn refresh_from_instrument(fields: Rc<Fields>) {
        let ticket = fields.entitlement_requests.issue();
        let update = on_instrument_change(
            &FetchTransport,
            &fields.origin,
            &fields.instrument.value(),
            &fields.entitlement.value(),
        )
        .await;
        if let Some(options) = update.filter(|_| fields.entitlement_requests.is_latest(ticket)) {
            fill(&fields.entitlement, &options);
        }
    }

    fn fill(select: &HtmlSelectElement, options: &[SelectOption]) {
        select.set_length(0);
        for option in options {
            let Ok(el) = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value) else {
                continue;
            };
            el.set_default_selected(option.selected);
            el.set_selected(option.selected);
            if let Err(err) = select.add_with_html_option_element(&el) {
                log::warn!("failed to add option {}: {err:?}", option.value);
            }
        }
    }

    fn listen_change(select: &HtmlSelectElement, handler: impl Fn() + 'static) {
        let on_change = Closure::wrap(Box::new(move |_ev: web_sys::Event| handler()) as Box<dyn FnMut(web_sys::Event)>);
        if select
            .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
            .is_ok()
        {
            on_change.forget();
        }
    }
}
