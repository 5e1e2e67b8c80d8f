//! DOM element bindings.
//!
//! Only the grid is mandatory; the search box and status tabs are optional
//! parts of the page shell.

use mh_catalog::HubConfig;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement};

// ── Helpers ──

fn doc() -> Document {
    gloo_utils::document()
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(nl) = doc().query_selector_all(selector) else {
        return Vec::new();
    };
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

/// Nearest ancestor (or self) of an event target matching `selector`.
pub fn closest(target: Option<web_sys::EventTarget>, selector: &str) -> Option<Element> {
    let el = target?.dyn_into::<Element>().ok()?;
    el.closest(selector).ok().flatten()
}

/// Current page URL, or an empty string when the location is unreadable.
pub fn location_href() -> String {
    window().location().href().unwrap_or_default()
}

// ── Elements struct ──

#[derive(Clone)]
pub struct Elements {
    pub grid: Element,
    pub search_input: Option<HtmlInputElement>,
    pub tabs: Vec<Element>,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after the document has loaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            grid: get_el!("modulesGrid"),
            search_input: by_id_typed::<HtmlInputElement>("searchInput"),
            tabs: query_all(".tab"),
        })
    }

    /// Config overrides come from `data-*` attributes on the grid.
    pub fn config(&self) -> HubConfig {
        HubConfig::from_lookup(|name| self.grid.get_attribute(name))
    }
}
