//! Destination link construction.

use mh_api_types::{IdentityContext, ModuleDescriptor};
use mh_storage::{KeyValueStore, write_best_effort};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;
use url::Url;

use crate::config::StorageKeys;
use crate::identity::SLUG_PARAM;

pub const PHONE_PARAM: &str = "phone";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

/// Sets `key=value` in the query of `url`.
///
/// Absolute URLs are edited structurally: the first existing `key` is
/// overwritten in place and any later duplicates removed. Anything that does
/// not parse on its own (relative paths) gets the encoded pair appended.
pub fn with_param(url: &str, key: &str, value: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if value.is_empty() {
        return url.to_owned();
    }

    match Url::parse(url) {
        Ok(mut parsed) => {
            set_query_pair(&mut parsed, key, value);
            parsed.into()
        }
        Err(_) => {
            let sep = if url.contains('?') { '&' } else { '?' };
            format!(
                "{url}{sep}{}={}",
                encode_component(key),
                encode_component(value)
            )
        }
    }
}

fn set_query_pair(url: &mut Url, key: &str, value: &str) {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut replaced = false;
    pairs.retain_mut(|(k, v)| {
        if k.as_str() != key {
            return true;
        }
        if replaced {
            return false;
        }
        *v = value.to_owned();
        replaced = true;
        true
    });
    if !replaced {
        pairs.push((key.to_owned(), value.to_owned()));
    }
    let mut query = url.query_pairs_mut();
    query.clear();
    for (k, v) in &pairs {
        query.append_pair(k, v);
    }
}

/// Which identity parameter a link carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkParam {
    Slug,
    Phone,
    None,
}

/// Slug first; phone only for modules that accept it.
pub fn select_param(module: &ModuleDescriptor, identity: &IdentityContext) -> LinkParam {
    if !identity.slug.is_empty() {
        LinkParam::Slug
    } else if module.phone_param && !identity.phone.is_empty() {
        LinkParam::Phone
    } else {
        LinkParam::None
    }
}

/// The destination for `module` under `identity`, without side effects.
pub fn build_link(module: &ModuleDescriptor, identity: &IdentityContext) -> String {
    match select_param(module, identity) {
        LinkParam::Slug => with_param(&module.direct_url, SLUG_PARAM, &identity.slug),
        LinkParam::Phone => with_param(&module.direct_url, PHONE_PARAM, &identity.phone),
        LinkParam::None => module.direct_url.clone(),
    }
}

/// Builds links and remembers the slug that was used for them.
pub struct LinkResolver<S> {
    store: S,
    keys: StorageKeys,
}

impl<S> LinkResolver<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Like [`build_link`], and when the slug was applied it is saved so
    /// later visits without `?slug=` still resolve. A failed save changes
    /// nothing about the returned link.
    pub fn resolve(&self, module: &ModuleDescriptor, identity: &IdentityContext) -> String {
        let link = build_link(module, identity);
        if select_param(module, identity) == LinkParam::Slug
            && !write_best_effort(&self.store, &self.keys.slug, &identity.slug)
        {
            debug!(key = %module.key, "slug not persisted");
        }
        link
    }
}
