use mh_api_types::{ModuleDescriptor, StatusFilter, trim_text};
use serde_json::Value;
use tracing::debug;

use crate::coerce::coerce_entry;
use crate::error::LoadError;

/// The module list for one page session.
///
/// Built once from the catalog document and never mutated afterwards; the
/// frontend shares it behind an `Rc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    modules: Vec<ModuleDescriptor>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Keeps only descriptors with `key`, `name` and `direct_url` set,
    /// in the order given.
    pub fn from_modules<I>(modules: I) -> Self
    where
        I: IntoIterator<Item = ModuleDescriptor>,
    {
        let modules = modules
            .into_iter()
            .filter(|m| {
                let keep = m.has_required_fields();
                if !keep {
                    debug!(key = %m.key, name = %m.name, "dropping incomplete catalog entry");
                }
                keep
            })
            .collect();
        Self { modules }
    }

    /// Normalizes a parsed `{ "modules": [...] }` document.
    ///
    /// A missing or non-array `modules` field is an empty catalog; only a
    /// `null` document is rejected.
    pub fn from_document(document: &Value) -> Result<Self, LoadError> {
        if document.is_null() {
            return Err(LoadError::Malformed);
        }

        let Some(entries) = document.get("modules").and_then(Value::as_array) else {
            return Ok(Self::empty());
        };

        Ok(Self::from_modules(entries.iter().filter_map(coerce_entry)))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModuleDescriptor> {
        self.modules.iter()
    }

    pub fn as_slice(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    /// First descriptor with the given key.
    pub fn find(&self, key: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.key == key)
    }

    /// Descriptors matching both the status filter and the free-text query,
    /// in catalog order.
    pub fn filter(&self, query: &str, status: &StatusFilter) -> Vec<&ModuleDescriptor> {
        let needle = trim_text(query).to_lowercase();
        self.modules
            .iter()
            .filter(|m| status.matches(&m.status))
            .filter(|m| needle.is_empty() || haystack(m).contains(&needle))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ModuleDescriptor;
    type IntoIter = std::slice::Iter<'a, ModuleDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn haystack(m: &ModuleDescriptor) -> String {
    [
        m.key.as_str(),
        m.name.as_str(),
        m.tag.as_str(),
        m.desc.as_str(),
        m.status.as_str(),
        m.status_label.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn module(key: &str, status: &str, tag: &str) -> ModuleDescriptor {
        ModuleDescriptor {
            key: key.to_owned(),
            name: format!("Module {key}"),
            tag: tag.to_owned(),
            status: status.to_owned(),
            direct_url: format!("https://x.test/{key}"),
            ..Default::default()
        }
    }

    #[test]
    fn incomplete_entries_are_dropped_in_order() {
        let doc = json!({
            "modules": [
                {"key": "a", "name": "A", "directUrl": "a.html"},
                {"key": "b", "name": "B"},
                null,
                {"key": "", "name": "C", "directUrl": "c.html"},
                {"key": "d", "name": "   ", "directUrl": "d.html"},
                "stray",
                {"key": "e", "name": "E", "directUrl": "e.html"}
            ]
        });
        let catalog = Catalog::from_document(&doc).expect("catalog");
        let keys: Vec<&str> = catalog.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, ["a", "e"]);
    }

    #[test]
    fn missing_or_wrong_modules_field_is_empty() {
        for doc in [json!({}), json!({"modules": {"a": 1}}), json!([1, 2]), json!("x")] {
            let catalog = Catalog::from_document(&doc).expect("tolerated shape");
            assert!(catalog.is_empty());
        }
    }

    #[test]
    fn null_document_is_malformed() {
        assert!(matches!(
            Catalog::from_document(&Value::Null),
            Err(LoadError::Malformed)
        ));
    }

    #[test]
    fn query_matches_case_insensitively_across_fields() {
        let catalog = Catalog::from_modules([
            module("pay", "live", "Payments"),
            module("pin", "beta", "Beta Access"),
            module("menu", "soon", "Menu"),
        ]);

        let hits = catalog.filter("  BETA ", &StatusFilter::All);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, "pin");

        let hits = catalog.filter("module", &StatusFilter::All);
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn status_filter_requires_exact_match() {
        let catalog = Catalog::from_modules([
            module("pay", "live", ""),
            module("pin", "beta", ""),
            module("menu", "", ""),
            module("cash", "live", ""),
        ]);

        let live: Vec<&str> = catalog
            .filter("", &StatusFilter::parse("live"))
            .into_iter()
            .map(|m| m.key.as_str())
            .collect();
        assert_eq!(live, ["pay", "cash"]);

        assert_eq!(catalog.filter("", &StatusFilter::All).len(), 4);
        assert!(catalog.filter("pin", &StatusFilter::parse("live")).is_empty());
    }

    #[test]
    fn find_returns_first_match() {
        let mut dup = module("pay", "beta", "");
        dup.name = "Second".to_owned();
        let catalog = Catalog::from_modules([module("pay", "live", ""), dup]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("pay").map(|m| m.status.as_str()), Some("live"));
        assert!(catalog.find("nope").is_none());
    }
}
