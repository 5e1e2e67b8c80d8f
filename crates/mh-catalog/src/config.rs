use mh_api_types::trim_text;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATALOG_URL: &str = "./modules.json";
pub const DEFAULT_PHONE_KEY: &str = "DIGIY_HUB_PHONE";
pub const DEFAULT_SLUG_KEY: &str = "DIGIY_PRO_SLUG";
pub const DEFAULT_EMPTY_MESSAGE: &str = "Aucun module PRO trouv\u{e9}.";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ATTR_CATALOG_URL: &str = "data-catalog-url";
pub const ATTR_PHONE_KEY: &str = "data-phone-key";
pub const ATTR_SLUG_KEY: &str = "data-slug-key";
pub const ATTR_EMPTY_MESSAGE: &str = "data-empty-message";
pub const ATTR_LOG_LEVEL: &str = "data-log-level";

/// Storage keys for the identity tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageKeys {
    /// Read-only from the hub's side; another page writes it.
    pub phone: String,
    pub slug: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            phone: DEFAULT_PHONE_KEY.to_owned(),
            slug: DEFAULT_SLUG_KEY.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HubConfig {
    pub catalog_url: String,
    pub storage: StorageKeys,
    pub empty_message: String,
    pub log_level: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_owned(),
            storage: StorageKeys::default(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_owned(),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl HubConfig {
    /// Builds a config from named overrides (the `data-*` attributes of the
    /// grid element in the browser). Missing or blank values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pick = |name: &str, fallback: String| {
            lookup(name)
                .map(|v| trim_text(&v).to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };

        Self {
            catalog_url: pick(ATTR_CATALOG_URL, defaults.catalog_url),
            storage: StorageKeys {
                phone: pick(ATTR_PHONE_KEY, defaults.storage.phone),
                slug: pick(ATTR_SLUG_KEY, defaults.storage.slug),
            },
            empty_message: pick(ATTR_EMPTY_MESSAGE, defaults.empty_message),
            log_level: pick(ATTR_LOG_LEVEL, defaults.log_level),
        }
    }
}
