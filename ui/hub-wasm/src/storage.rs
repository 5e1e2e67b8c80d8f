//! `localStorage` behind the `KeyValueStore` seam.

use mh_storage::{KeyValueStore, Result, StorageError};
use wasm_bindgen::JsValue;

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

fn local_storage() -> Result<web_sys::Storage> {
    let window = web_sys::window().ok_or(StorageError::Unavailable)?;
    window
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read {
                key: key.to_owned(),
                reason: describe(&e),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_owned(),
                reason: describe(&e),
            })
    }
}
