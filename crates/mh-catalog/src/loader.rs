//! Catalog loading.
//!
//! The fetch itself sits behind [`CatalogSource`] so the browser can use
//! `window.fetch` while tests feed canned responses.

use async_trait::async_trait;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::HubConfig;
use crate::error::LoadError;

/// Query parameter appended to the catalog URL to defeat caches.
pub const CACHE_BUST_PARAM: &str = "v";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub url: String,
    /// Ask the transport to skip the HTTP cache (`cache: "no-store"`).
    pub bypass_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchedBody {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport for the catalog document. Browser futures are not `Send`.
#[async_trait(?Send)]
pub trait CatalogSource {
    async fn fetch(&self, request: &CatalogRequest) -> Result<FetchedBody, LoadError>;
}

pub fn cache_busted_url(base: &str, now_ms: u64) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}{CACHE_BUST_PARAM}={now_ms}")
}

/// Parses and normalizes a catalog body.
pub fn parse_catalog(body: &[u8]) -> Result<Catalog, LoadError> {
    let document: serde_json::Value = serde_json::from_slice(body)?;
    Catalog::from_document(&document)
}

/// Fetches the configured catalog once, bypassing caches.
pub async fn load_catalog<S>(
    source: &S,
    config: &HubConfig,
    now_ms: u64,
) -> Result<Catalog, LoadError>
where
    S: CatalogSource + ?Sized,
{
    let request = CatalogRequest {
        url: cache_busted_url(&config.catalog_url, now_ms),
        bypass_cache: true,
    };

    let response = source.fetch(&request).await?;
    if !response.is_success() {
        return Err(LoadError::Http {
            status: response.status,
        });
    }

    let catalog = parse_catalog(&response.body)?;
    info!(url = %request.url, modules = catalog.len(), "catalog loaded");
    Ok(catalog)
}
