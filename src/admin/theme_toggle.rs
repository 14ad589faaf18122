//! Admin-site theme toggle button.

#[cfg(test)]
#[path = "theme_toggle_test.rs"]
mod theme_toggle_test;

use crate::util::theme;

pub const TOGGLE_SELECTOR: &str = ".theme-toggle";

/// Apply the effective theme and attach the toggle to `.theme-toggle`.
///
/// Pages without the button still get the theme applied.
#[cfg_attr(feature = "csr", wasm_bindgen::prelude::wasm_bindgen)]
pub fn init_theme_toggle() {
    #[cfg(feature = "csr")]
    crate::init_logging();

    theme::apply(theme::read_preference());

    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast as _;
        use wasm_bindgen::closure::Closure;

        let Some(button) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.query_selector(TOGGLE_SELECTOR).ok().flatten())
        else {
            return;
        };
        let on_click = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            let next = theme::toggle(theme::read_preference());
            log::debug!("admin theme set to {}", next.as_str());
        }) as Box<dyn FnMut(web_sys::Event)>);
        if button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .is_ok()
        {
            // The button lives as long as the page.
            on_click.forget();
        }
    }
}
