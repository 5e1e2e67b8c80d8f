use mh_api_types::{IdentityContext, trim_text};
use mh_storage::{KeyValueStore, read_trimmed};
use url::Url;

use crate::config::StorageKeys;

pub const SLUG_PARAM: &str = "slug";

/// The trimmed `slug` query parameter of the page URL.
///
/// `None` only when the URL does not parse or the parameter is missing or
/// empty. A parameter of pure whitespace is present and trims to `""`.
pub fn slug_from_location(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    let (_, value) = url.query_pairs().find(|(k, _)| k == SLUG_PARAM)?;
    if value.is_empty() {
        return None;
    }
    Some(trim_text(&value).to_owned())
}

/// Reads the identity for a link built right now.
///
/// The page URL's slug beats the stored one; the phone only ever comes from
/// storage. Nothing is written here.
pub fn resolve_identity<S>(href: &str, store: &S, keys: &StorageKeys) -> IdentityContext
where
    S: KeyValueStore + ?Sized,
{
    let slug = slug_from_location(href).unwrap_or_else(|| read_trimmed(store, &keys.slug));
    let phone = read_trimmed(store, &keys.phone);
    IdentityContext { slug, phone }
}
