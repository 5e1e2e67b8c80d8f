//! Event binding and rendering.
//!
//! Search and status tabs update the UI state and re-render. Card clicks
//! and key presses are delegated from the grid and turned into
//! [`CardAction`]s for the hub.

use std::rc::Rc;

use mh_api_types::CardAction;
use mh_catalog::Hub;
use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::dom::{self, Elements};
use crate::sink::BrowserSink;
use crate::state;
use crate::storage::LocalStore;

pub type PageHub = Hub<LocalStore>;

/// Re-render the grid from the current UI state.
pub fn render(els: &Elements, hub: &PageHub) {
    let ui = state::snapshot();
    dom::set_inner_html(&els.grid, &hub.render(&ui.query, &ui.status));
}

/// Bind all UI event listeners. Call once after the catalog is loaded.
pub fn bind_events(els: &Elements, hub: &Rc<PageHub>) {
    // ── Search ──
    if let Some(input) = &els.search_input {
        let els2 = els.clone();
        let hub2 = Rc::clone(hub);
        let input2 = input.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            state::set_query(&input2.value());
            render(&els2, &hub2);
        }) as Box<dyn FnMut(_)>);
        let _ = input.add_event_listener_with_callback("input", cb.as_ref().unchecked_ref());
        cb.forget();
    }

    // ── Status tabs ──
    for tab in &els.tabs {
        let status = tab.get_attribute("data-status").unwrap_or_default();
        let clicked = tab.clone();
        let els2 = els.clone();
        let hub2 = Rc::clone(hub);
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            for t in &els2.tabs {
                dom::toggle_class(t, "active", t == &clicked);
            }
            state::set_status(&status);
            render(&els2, &hub2);
        }) as Box<dyn FnMut(_)>);
        let _ = tab.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        cb.forget();
    }

    // ── Cards (delegated) ──
    {
        let hub2 = Rc::clone(hub);
        let cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            let Some(card) = dom::closest(e.target(), ".card") else {
                return;
            };
            let action = dom::closest(e.target(), "button")
                .and_then(|btn| btn.get_attribute("data-action"))
                .and_then(|a| CardAction::from_attr(&a))
                .unwrap_or(CardAction::Open);
            if action == CardAction::Copy {
                e.prevent_default();
            }
            activate(&hub2, &card, action);
        }) as Box<dyn FnMut(_)>);
        let _ = els
            .grid
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        cb.forget();
    }
    {
        let hub2 = Rc::clone(hub);
        let cb = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
            let key = e.key();
            if key != "Enter" && key != " " {
                return;
            }
            let Some(card) = dom::closest(e.target(), ".card") else {
                return;
            };
            e.prevent_default();
            activate(&hub2, &card, CardAction::Open);
        }) as Box<dyn FnMut(_)>);
        let _ = els
            .grid
            .add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
        cb.forget();
    }
}

fn activate(hub: &PageHub, card: &web_sys::Element, action: CardAction) {
    let key = card.get_attribute("data-key").unwrap_or_default();
    let link = hub.dispatch(&BrowserSink, action, &key, &dom::location_href());
    debug!(key, action = action.as_str(), link = ?link, "card activated");
}
