//! Catalog fetch over `window.fetch`.

use async_trait::async_trait;
use mh_catalog::{CatalogRequest, CatalogSource, FetchedBody, LoadError};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

use crate::dom;

fn fetch_error(err: JsValue) -> LoadError {
    LoadError::Fetch(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSource;

#[async_trait(?Send)]
impl CatalogSource for BrowserSource {
    async fn fetch(&self, request: &CatalogRequest) -> Result<FetchedBody, LoadError> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        if request.bypass_cache {
            opts.set_cache(RequestCache::NoStore);
        }

        let req = Request::new_with_str_and_init(&request.url, &opts).map_err(fetch_error)?;

        let resp_value = JsFuture::from(dom::window().fetch_with_request(&req))
            .await
            .map_err(fetch_error)?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| LoadError::Fetch("response is not a Response".to_string()))?;

        let text = JsFuture::from(resp.text().map_err(fetch_error)?)
            .await
            .map_err(fetch_error)?;

        Ok(FetchedBody {
            status: resp.status(),
            body: text.as_string().unwrap_or_default().into_bytes(),
        })
    }
}
