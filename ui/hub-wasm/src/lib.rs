//! ModuleHub WASM Frontend
//!
//! Loads the module catalog, renders it as cards, filters it from the
//! search box and status tabs, and sends the user to the chosen module
//! with their slug or phone attached.

pub mod api;
pub mod dom;
pub mod events;
pub mod logging;
pub mod sink;
pub mod state;
pub mod storage;

use std::rc::Rc;

use mh_api_types::{IdentityContext, ModuleDescriptor, trim_text};
use mh_catalog::render::CardView;
use mh_catalog::{Catalog, Hub, build_link, load_catalog};
use tracing::warn;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let config = els.config();
    logging::init(&config.log_level);

    // A failed load still gets a page: the empty-state card.
    let now_ms = js_sys::Date::now() as u64;
    let catalog = match load_catalog(&api::BrowserSource, &config, now_ms).await {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(url = %config.catalog_url, %err, "catalog unavailable");
            Catalog::empty()
        }
    };

    let hub = Rc::new(Hub::new(Rc::new(catalog), storage::LocalStore, &config));
    events::bind_events(&els, &hub);
    events::render(&els, &hub);

    Ok(())
}

/// Builds the destination for a descriptor-shaped JS object. Nothing is
/// persisted.
#[wasm_bindgen(js_name = resolveLink)]
pub fn resolve_link(
    module: JsValue,
    slug: Option<String>,
    phone: Option<String>,
) -> Result<String, JsValue> {
    let module: ModuleDescriptor = serde_wasm_bindgen::from_value(module)?;
    let identity = IdentityContext::new(
        trim_text(&slug.unwrap_or_default()),
        trim_text(&phone.unwrap_or_default()),
    );
    Ok(build_link(&module, &identity))
}

/// Card markup for a descriptor-shaped JS object.
#[wasm_bindgen(js_name = renderCard)]
pub fn render_card(module: JsValue) -> Result<String, JsValue> {
    let module: ModuleDescriptor = serde_wasm_bindgen::from_value(module)?;
    Ok(CardView::from_module(&module).to_html())
}
