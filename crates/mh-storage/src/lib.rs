use std::cell::RefCell;
use std::collections::HashMap;
use mh_api_types::trim_text;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to read '{key}': {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// String-to-string storage that survives page reloads.
///
/// Browser storage is single-threaded and mutated through a shared handle,
/// so writes take `&self`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Stands in for storage that has been disabled by the browser: every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(StorageError::Unavailable)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RefCell::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Reads a key, folding every failure into `None`.
pub fn read_best_effort<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            debug!(key, %err, "storage read ignored");
            None
        }
    }
}

/// Reads a key and trims it; absent or failed reads give an empty string.
pub fn read_trimmed<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> String {
    read_best_effort(store, key)
        .map(|v| trim_text(&v).to_owned())
        .unwrap_or_default()
}

/// Writes a key, reporting whether the write landed.
pub fn write_best_effort<S: KeyValueStore + ?Sized>(store: &S, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(err) => {
            debug!(key, %err, "storage write ignored");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_roundtrip() -> Result<()> {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        store.set("slug", "acme")?;
        assert_eq!(store.get("slug")?, Some("acme".to_owned()));
        store.set("slug", "globex")?;
        assert_eq!(store.get("slug")?, Some("globex".to_owned()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("phone")?, None);
        Ok(())
    }

    #[test]
    fn best_effort_helpers_swallow_failures() {
        let disabled = DisabledStore;
        assert_eq!(read_best_effort(&disabled, "slug"), None);
        assert_eq!(read_trimmed(&disabled, "slug"), "");
        assert!(!write_best_effort(&disabled, "slug", "acme"));
    }

    #[test]
    fn read_trimmed_strips_whitespace() {
        let store = InMemoryStore::with_entries([
            ("phone", "  221770000000 \n"),
            ("bom", "\u{feff}acme\u{3000}"),
        ]);
        assert_eq!(read_trimmed(&store, "phone"), "221770000000");
        assert_eq!(read_trimmed(&store, "bom"), "acme");
        assert_eq!(read_trimmed(&store, "slug"), "");
        assert!(write_best_effort(&store, "slug", "acme"));
        assert_eq!(read_trimmed(&store, "slug"), "acme");
    }

    #[test]
    fn stores_work_through_references() {
        let store = std::rc::Rc::new(InMemoryStore::new());
        let shared = std::rc::Rc::clone(&store);
        assert!(write_best_effort(&shared, "k", "v"));
        assert_eq!(read_best_effort(store.as_ref(), "k"), Some("v".to_owned()));
    }
}
