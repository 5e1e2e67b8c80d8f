//! ModuleHub catalog engine.
//!
//! Everything the hub page does that does not touch the DOM: loading and
//! normalizing the module catalog, filtering, identity resolution, link
//! construction, card markup and action dispatch. The browser frontend in
//! `ui/hub-wasm` plugs its fetch, storage and navigation into the traits
//! defined here.

pub mod catalog;
pub mod coerce;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod identity;
pub mod link;
pub mod loader;
pub mod render;

pub use catalog::Catalog;
pub use config::{HubConfig, StorageKeys};
pub use dispatch::{Hub, LinkSink};
pub use error::LoadError;
pub use identity::resolve_identity;
pub use link::{LinkResolver, build_link, with_param};
pub use loader::{CatalogRequest, CatalogSource, FetchedBody, load_catalog, parse_catalog};
pub use mh_api_types::{CardAction, IdentityContext, ModuleDescriptor, StatusFilter};
