//! Navigation and clipboard side effects for card actions.

use js_sys::{Function, Promise, Reflect};
use mh_catalog::LinkSink;
use thiserror::Error;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::dom;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard API not available")]
    Unsupported,
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Starts `navigator.clipboard.writeText(text)`.
///
/// Looked up dynamically: insecure origins and older browsers have no
/// `navigator.clipboard` at all.
fn start_clipboard_write(text: &str) -> Result<Promise, ClipboardError> {
    let navigator = dom::window().navigator();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|_| ClipboardError::Unsupported)?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(ClipboardError::Unsupported);
    }
    let write_text: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(|_| ClipboardError::Unsupported)?
        .dyn_into()
        .map_err(|_| ClipboardError::Unsupported)?;
    write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|e| ClipboardError::Rejected(describe(&e)))?
        .dyn_into::<Promise>()
        .map_err(|_| ClipboardError::Unsupported)
}

async fn finish_clipboard_write(promise: Promise) -> Result<(), ClipboardError> {
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| ClipboardError::Rejected(describe(&e)))
}

/// Starts the clipboard write, hands any pending write to `settle`, then
/// confirms. `start` must run before `confirm`: the alert ends the click's
/// user activation, and `writeText` needs it.
fn copy_with<P>(
    start: impl FnOnce() -> Result<P, ClipboardError>,
    settle: impl FnOnce(P),
    confirm: impl FnOnce(),
) {
    match start() {
        Ok(pending) => settle(pending),
        Err(err) => debug!(%err, "copy to clipboard ignored"),
    }
    confirm();
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSink;

impl LinkSink for BrowserSink {
    fn navigate(&self, url: &str) {
        if let Err(err) = dom::window().location().set_href(url) {
            warn!(url, err = %describe(&err), "navigation failed");
        }
    }

    fn copy(&self, url: &str) {
        copy_with(
            || start_clipboard_write(url),
            |promise| {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = finish_clipboard_write(promise).await {
                        debug!(%err, "copy to clipboard ignored");
                    }
                })
            },
            || {
                let _ = dom::window().alert_with_message(&format!("Copi\u{e9} \u{2705}\n{url}"));
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn write_starts_before_the_confirmation() {
        let calls = RefCell::new(Vec::new());
        copy_with(
            || {
                calls.borrow_mut().push("start");
                Ok(7)
            },
            |pending| {
                assert_eq!(pending, 7);
                calls.borrow_mut().push("settle");
            },
            || calls.borrow_mut().push("confirm"),
        );
        assert_eq!(*calls.borrow(), ["start", "settle", "confirm"]);
    }

    #[test]
    fn missing_clipboard_still_confirms() {
        let calls = RefCell::new(Vec::new());
        copy_with(
            || {
                calls.borrow_mut().push("start");
                Err::<(), _>(ClipboardError::Unsupported)
            },
            |_| calls.borrow_mut().push("settle"),
            || calls.borrow_mut().push("confirm"),
        );
        assert_eq!(*calls.borrow(), ["start", "confirm"]);
    }
}
