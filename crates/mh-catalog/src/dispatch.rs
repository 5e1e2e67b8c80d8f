use std::rc::Rc;

use mh_api_types::{CardAction, IdentityContext, ModuleDescriptor, StatusFilter};
use mh_storage::KeyValueStore;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::HubConfig;
use crate::identity::resolve_identity;
use crate::link::LinkResolver;
use crate::render::render_grid;

/// Where a resolved link goes.
pub trait LinkSink {
    fn navigate(&self, url: &str);
    /// Best effort; implementations swallow clipboard failures.
    fn copy(&self, url: &str);
}

/// The page's catalog plus everything needed to act on a card.
pub struct Hub<S> {
    catalog: Rc<Catalog>,
    resolver: LinkResolver<S>,
    empty_message: String,
}

impl<S> Hub<S>
where
    S: KeyValueStore,
{
    pub fn new(catalog: Rc<Catalog>, store: S, config: &HubConfig) -> Self {
        Self {
            catalog,
            resolver: LinkResolver::new(store, config.storage.clone()),
            empty_message: config.empty_message.clone(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn identity(&self, href: &str) -> IdentityContext {
        resolve_identity(href, self.resolver.store(), self.resolver.keys())
    }

    pub fn visible(&self, query: &str, status: &StatusFilter) -> Vec<&ModuleDescriptor> {
        self.catalog.filter(query, status)
    }

    pub fn render(&self, query: &str, status: &StatusFilter) -> String {
        render_grid(&self.visible(query, status), &self.empty_message)
    }

    /// Resolves the link for `key` with the identity current at `href`.
    pub fn link_for(&self, key: &str, href: &str) -> Option<String> {
        let module = self.catalog.find(key)?;
        let identity = self.identity(href);
        Some(self.resolver.resolve(module, &identity))
    }

    /// Runs a card action. Unknown keys do nothing.
    pub fn dispatch<K>(&self, sink: &K, action: CardAction, key: &str, href: &str) -> Option<String>
    where
        K: LinkSink + ?Sized,
    {
        let Some(link) = self.link_for(key, href) else {
            debug!(key, action = action.as_str(), "no module for card action");
            return None;
        };
        match action {
            CardAction::Open => sink.navigate(&link),
            CardAction::Copy => sink.copy(&link),
        }
        Some(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mh_storage::InMemoryStore;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        calls: RefCell<Vec<(CardAction, String)>>,
    }

    impl LinkSink for RecordingSink {
        fn navigate(&self, url: &str) {
            self.calls.borrow_mut().push((CardAction::Open, url.to_owned()));
        }

        fn copy(&self, url: &str) {
            self.calls.borrow_mut().push((CardAction::Copy, url.to_owned()));
        }
    }

    fn hub(store: InMemoryStore) -> Hub<InMemoryStore> {
        let catalog = Catalog::from_modules([ModuleDescriptor {
            key: "pin".to_owned(),
            name: "PIN".to_owned(),
            phone_param: true,
            direct_url: "https://x.test/pin".to_owned(),
            ..Default::default()
        }]);
        Hub::new(Rc::new(catalog), store, &HubConfig::default())
    }

    #[test]
    fn actions_route_to_the_sink() {
        let hub = hub(InMemoryStore::new());
        let sink = RecordingSink::default();

        hub.dispatch(&sink, CardAction::Open, "pin", "https://hub.test/?slug=acme");
        hub.dispatch(&sink, CardAction::Copy, "pin", "https://hub.test/");

        let calls = sink.calls.borrow();
        assert_eq!(
            *calls,
            vec![
                (CardAction::Open, "https://x.test/pin?slug=acme".to_owned()),
                (CardAction::Copy, "https://x.test/pin?slug=acme".to_owned()),
            ]
        );
    }

    #[test]
    fn unknown_key_is_ignored() {
        let hub = hub(InMemoryStore::new());
        let sink = RecordingSink::default();
        assert_eq!(hub.dispatch(&sink, CardAction::Open, "ghost", "https://hub.test/"), None);
        assert!(sink.calls.borrow().is_empty());
    }

    #[test]
    fn phone_is_used_without_slug() {
        let keys = HubConfig::default().storage;
        let hub = hub(InMemoryStore::with_entries([(keys.phone, "221770000000".to_owned())]));
        assert_eq!(
            hub.link_for("pin", "https://hub.test/").as_deref(),
            Some("https://x.test/pin?phone=221770000000")
        );
    }

    #[test]
    fn render_uses_configured_empty_message() {
        let hub = hub(InMemoryStore::new());
        assert!(hub.render("zzz", &StatusFilter::All).contains("Aucun module PRO"));
        assert!(hub.render("", &StatusFilter::All).contains(r#"data-key="pin""#));
    }
}
