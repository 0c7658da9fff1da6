//! End-to-end pipeline tests: gating, region priority, idempotent mounting
//! and graceful degradation, driven through a scripted backend.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use bestprice::infrastructure::ReadyState;
use bestprice::{
    CredentialStore, OverlayConfig, PageLifecycleController, PricingBackend, StaticDocument,
};

const PRODUCT_URL: &str = "https://store.steampowered.com/app/730/CS2/";

const PRODUCT_PAGE: &str = r#"<html><head></head><body>
    <div id="application_config" data-config='{"COUNTRY":"DE"}'></div>
    <div id="game_area_purchase"></div>
</body></html>"#;

fn price_payload() -> String {
    r#"{
        "official_price": "19.99",
        "keyshop_price": "N/A",
        "historical_official": "N/A",
        "historical_keyshops": "N/A",
        "currency": "USD",
        "url": "https://gg.deals/steam/app/730/"
    }"#
    .to_string()
}

#[derive(Default)]
struct ScriptedBackend {
    payload: Option<String>,
    fail: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    fn returning(payload: &str) -> Self {
        Self {
            payload: Some(payload.to_string()),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PricingBackend for ScriptedBackend {
    async fn get_ggdeals_prices(
        &self,
        app_id: &str,
        region_code: &str,
    ) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((app_id.to_string(), region_code.to_string()));
        if self.fail {
            anyhow::bail!("backend unavailable");
        }
        Ok(self.payload.clone())
    }

    async fn load_api_key(&self) -> Result<String> {
        Ok(String::new())
    }

    async fn save_api_key(&self, _key: &str) -> Result<bool> {
        Ok(true)
    }
}

fn controller(backend: Arc<ScriptedBackend>) -> PageLifecycleController {
    PageLifecycleController::new(backend, OverlayConfig::default())
}

#[tokio::test]
async fn non_product_page_issues_no_backend_calls() {
    let backend = Arc::new(ScriptedBackend::returning(&price_payload()));
    let mut document = StaticDocument::parse(PRODUCT_PAGE);

    controller(backend.clone())
        .attach("https://store.steampowered.com/bundle/123/", &mut document)
        .await;

    assert_eq!(backend.calls(), 0);
    assert!(document.inserted_fragments().is_empty());
    assert!(document.appended_styles().is_empty());
}

#[tokio::test]
async fn loaded_product_page_mounts_the_widget_once() {
    let backend = Arc::new(ScriptedBackend::returning(&price_payload()));
    let mut document = StaticDocument::parse(PRODUCT_PAGE);
    let mut controller = controller(backend.clone());

    controller.attach(PRODUCT_URL, &mut document).await;

    assert_eq!(backend.calls(), 1);
    // Region resolved from the config blob and lower-cased for the call
    assert_eq!(
        backend.requests.lock().unwrap()[0],
        ("730".to_string(), "de".to_string())
    );
    assert_eq!(document.appended_styles().len(), 1);

    let fragments = document.inserted_fragments();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].anchor_id, "game_area_purchase");
    assert!(fragments[0].html.contains("Official:"));
    assert!(fragments[0].html.contains("19.99 USD"));
    assert!(fragments[0].html.contains("https://gg.deals/steam/app/730/"));

    // Re-attaching the same controller is a no-op
    controller.attach(PRODUCT_URL, &mut document).await;
    assert_eq!(backend.calls(), 1);
    assert_eq!(document.inserted_fragments().len(), 1);
}

#[tokio::test]
async fn config_blob_region_wins_over_the_cookie() {
    let backend = Arc::new(ScriptedBackend::returning(&price_payload()));
    let mut document = StaticDocument::parse(PRODUCT_PAGE).with_cookies("steamCountry=US%7Cx");

    controller(backend.clone())
        .attach(PRODUCT_URL, &mut document)
        .await;

    assert_eq!(backend.requests.lock().unwrap()[0].1, "de");
}

#[tokio::test]
async fn deferred_run_fires_exactly_once() {
    let backend = Arc::new(ScriptedBackend::returning(&price_payload()));
    let mut document =
        StaticDocument::parse(PRODUCT_PAGE).with_ready_state(ReadyState::Loading);
    let mut controller = controller(backend.clone());

    controller.attach(PRODUCT_URL, &mut document).await;
    assert_eq!(backend.calls(), 0);

    document.finish_loading();
    controller.notify_loaded(PRODUCT_URL, &mut document).await;
    assert_eq!(backend.calls(), 1);
    assert_eq!(document.inserted_fragments().len(), 1);

    // A second load signal must not re-run the pipeline
    controller.notify_loaded(PRODUCT_URL, &mut document).await;
    assert_eq!(backend.calls(), 1);
    assert_eq!(document.inserted_fragments().len(), 1);
}

#[tokio::test]
async fn empty_backend_result_renders_nothing() {
    let backend = Arc::new(ScriptedBackend::default());
    let mut document = StaticDocument::parse(PRODUCT_PAGE);

    controller(backend.clone())
        .attach(PRODUCT_URL, &mut document)
        .await;

    assert_eq!(backend.calls(), 1);
    assert!(document.inserted_fragments().is_empty());
    // Styles are injected regardless of price data
    assert_eq!(document.appended_styles().len(), 1);
}

#[tokio::test]
async fn malformed_payload_completes_without_rendering() {
    let backend = Arc::new(ScriptedBackend::returning("definitely not json"));
    let mut document = StaticDocument::parse(PRODUCT_PAGE);

    controller(backend.clone())
        .attach(PRODUCT_URL, &mut document)
        .await;

    assert_eq!(backend.calls(), 1);
    assert!(document.inserted_fragments().is_empty());
}

#[tokio::test]
async fn backend_failure_degrades_silently() {
    let backend = Arc::new(ScriptedBackend {
        fail: true,
        ..ScriptedBackend::default()
    });
    let mut document = StaticDocument::parse(PRODUCT_PAGE);

    controller(backend.clone())
        .attach(PRODUCT_URL, &mut document)
        .await;

    assert_eq!(backend.calls(), 1);
    assert!(document.inserted_fragments().is_empty());
}

#[tokio::test]
async fn missing_anchor_leaves_the_page_untouched() {
    let backend = Arc::new(ScriptedBackend::returning(&price_payload()));
    let mut document = StaticDocument::parse(
        r#"<html><body>
            <div id="application_config" data-config='{"COUNTRY":"DE"}'></div>
        </body></html>"#,
    );

    controller(backend.clone())
        .attach(PRODUCT_URL, &mut document)
        .await;

    assert_eq!(backend.calls(), 1);
    assert!(document.inserted_fragments().is_empty());
}

#[tokio::test]
async fn unresolvable_context_issues_no_fetch() {
    let backend = Arc::new(ScriptedBackend::returning(&price_payload()));
    // Product page, but no region source anywhere
    let mut document = StaticDocument::parse(
        r#"<html><body><div id="game_area_purchase"></div></body></html>"#,
    );

    controller(backend.clone())
        .attach(PRODUCT_URL, &mut document)
        .await;

    assert_eq!(backend.calls(), 0);
    assert!(document.inserted_fragments().is_empty());
}

#[tokio::test]
async fn api_key_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::with_path(dir.path().join("credentials.json"));

    assert!(store.save_api_key("gg-deals-key").await.unwrap());
    assert_eq!(store.load_api_key().await.unwrap(), "gg-deals-key");
}
