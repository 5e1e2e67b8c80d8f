//! UI state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! The catalog itself is not here: it is fixed at boot and handed around
//! inside the `Hub`.

use mh_api_types::StatusFilter;
use std::cell::RefCell;

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub query: String,
    pub status: StatusFilter,
}

thread_local! {
    static STATE: RefCell<UiState> = RefCell::new(UiState::default());
}

pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&UiState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut UiState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

pub fn snapshot() -> UiState {
    with(|s| s.clone())
}

pub fn set_query(q: &str) {
    with_mut(|s| s.query = q.to_string());
}

pub fn set_status(raw: &str) {
    with_mut(|s| s.status = StatusFilter::parse(raw));
}
