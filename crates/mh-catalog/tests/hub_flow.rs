use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use mh_catalog::{
    CardAction, CatalogRequest, CatalogSource, FetchedBody, Hub, HubConfig, LinkSink, LoadError,
    StatusFilter, load_catalog,
};
use mh_storage::{InMemoryStore, KeyValueStore};

const CATALOG: &str = r#"{
  "modules": [
    {"key": "pin", "name": "PIN Pro", "icon": "📍", "tag": "Accès", "desc": "Entrer avec votre PIN",
     "status": "live", "phoneParam": true, "directUrl": "https://pin.example.test/pin.html"},
    {"key": "beta-menu", "name": "Menu", "tag": "Beta Access", "status": "beta",
     "directUrl": "menu.html?mode=pro"},
    {"key": "broken", "name": "No destination"},
    {"name": "No key", "directUrl": "nokey.html"},
    {"key": "caisse", "name": "Caisse", "status": "soon", "statusLabel": "Bientôt",
     "directUrl": "caisse.html"}
  ]
}"#;

struct StaticSource(&'static str);

#[async_trait(?Send)]
impl CatalogSource for StaticSource {
    async fn fetch(&self, _request: &CatalogRequest) -> Result<FetchedBody, LoadError> {
        Ok(FetchedBody {
            status: 200,
            body: self.0.as_bytes().to_vec(),
        })
    }
}

#[derive(Default)]
struct Browser {
    location: RefCell<Option<String>>,
    clipboard: RefCell<Option<String>>,
}

impl LinkSink for Browser {
    fn navigate(&self, url: &str) {
        *self.location.borrow_mut() = Some(url.to_owned());
    }

    fn copy(&self, url: &str) {
        *self.clipboard.borrow_mut() = Some(url.to_owned());
    }
}

#[tokio::test]
async fn load_filter_and_open() -> anyhow::Result<()> {
    let config = HubConfig::default();
    let catalog = load_catalog(&StaticSource(CATALOG), &config, 42).await?;
    let keys: Vec<&str> = catalog.iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, ["pin", "beta-menu", "caisse"]);

    let store = Rc::new(InMemoryStore::new());
    let hub = Hub::new(Rc::new(catalog), Rc::clone(&store), &config);

    let beta = hub.visible("beta", &StatusFilter::All);
    assert_eq!(beta.len(), 1);
    assert_eq!(beta[0].key, "beta-menu");
    assert!(hub.visible("", &StatusFilter::parse("live")).iter().all(|m| m.status == "live"));

    let browser = Browser::default();
    let link = hub.dispatch(
        &browser,
        CardAction::Open,
        "beta-menu",
        "https://hub.example.test/index.html?slug=chez-awa",
    );
    assert_eq!(link.as_deref(), Some("menu.html?mode=pro&slug=chez-awa"));
    assert_eq!(browser.location.borrow().as_deref(), link.as_deref());

    // A later visit without ?slug= picks the remembered one up.
    assert_eq!(store.get(&config.storage.slug)?.as_deref(), Some("chez-awa"));
    let identity = hub.identity("https://hub.example.test/index.html");
    assert_eq!(identity.slug, "chez-awa");

    hub.dispatch(&browser, CardAction::Copy, "pin", "https://hub.example.test/");
    assert_eq!(
        browser.clipboard.borrow().as_deref(),
        Some("https://pin.example.test/pin.html?slug=chez-awa")
    );
    Ok(())
}

#[tokio::test]
async fn phone_fallback_without_slug() -> anyhow::Result<()> {
    let config = HubConfig::default();
    let catalog = load_catalog(&StaticSource(CATALOG), &config, 42).await?;
    let store = InMemoryStore::with_entries([(config.storage.phone.as_str(), "221 77 000 00 00")]);
    let hub = Hub::new(Rc::new(catalog), store, &config);

    assert_eq!(
        hub.link_for("pin", "https://hub.example.test/").as_deref(),
        Some("https://pin.example.test/pin.html?phone=221+77+000+00+00")
    );
    assert_eq!(
        hub.link_for("caisse", "https://hub.example.test/").as_deref(),
        Some("caisse.html")
    );
    Ok(())
}

#[test]
fn rendered_grid_escapes_catalog_text() {
    let catalog = mh_catalog::parse_catalog(
        br#"{"modules": [{"key": "x", "name": "<script>", "directUrl": "x.html"}]}"#,
    )
    .expect("catalog");
    let hub = Hub::new(Rc::new(catalog), InMemoryStore::new(), &HubConfig::default());
    let html = hub.render("", &StatusFilter::All);
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}
