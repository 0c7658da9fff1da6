//! The callable bridge to the pricing backend.
//!
//! The pipeline only ever sees the [`PricingBackend`] trait: one async
//! method per RPC, no retries, no streaming. The production implementation
//! talks to the GG.deals HTTP API using the persisted credential.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{NO_DATA, PriceRecord};
use crate::infrastructure::config::ggdeals;
use crate::infrastructure::credentials::CredentialStore;

/// Opaque request/response surface of the backend collaborator.
#[async_trait]
pub trait PricingBackend: Send + Sync {
    /// Serialized price record for a product/region pair, or `None` for
    /// "no data". A `None` is a normal outcome, not an error.
    async fn get_ggdeals_prices(&self, app_id: &str, region_code: &str)
    -> Result<Option<String>>;

    /// Previously persisted API credential; empty when none is stored.
    async fn load_api_key(&self) -> Result<String>;

    /// Persist the API credential. Returns true on success.
    async fn save_api_key(&self, key: &str) -> Result<bool>;
}

/// Production backend: the GG.deals HTTP API plus the on-disk credential
/// store.
pub struct GgDealsBackend {
    client: reqwest::Client,
    credentials: CredentialStore,
    base_url: String,
}

impl GgDealsBackend {
    pub fn new(credentials: CredentialStore) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bestprice/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            credentials,
            base_url: ggdeals::API_BASE_URL.to_string(),
        })
    }

    /// Point the backend at a different API host (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl PricingBackend for GgDealsBackend {
    async fn get_ggdeals_prices(
        &self,
        app_id: &str,
        region_code: &str,
    ) -> Result<Option<String>> {
        let key = self.credentials.load_api_key().await?;
        if key.is_empty() {
            debug!("no API key configured, skipping price lookup");
            return Ok(None);
        }

        let url = format!("{}{}", self.base_url, ggdeals::PRICES_BY_STEAM_APP_ID);
        let response = self
            .client
            .get(&url)
            .query(&[("ids", app_id), ("key", &key), ("region", region_code)])
            .send()
            .await
            .with_context(|| format!("price request for app {app_id} failed"))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "price request for app {} returned {}",
                app_id,
                response.status()
            );
        }

        let body: GgDealsResponse = response
            .json()
            .await
            .context("price response was not valid JSON")?;

        match map_response(&body, app_id) {
            Some(record) => Ok(Some(
                serde_json::to_string(&record).context("failed to serialize price record")?,
            )),
            None => {
                debug!(app_id, "pricing service had no data");
                Ok(None)
            }
        }
    }

    async fn load_api_key(&self) -> Result<String> {
        self.credentials.load_api_key().await
    }

    async fn save_api_key(&self, key: &str) -> Result<bool> {
        self.credentials.save_api_key(key).await
    }
}

/// Wire shape of the GG.deals prices-by-Steam-app-id response.
#[derive(Debug, Deserialize)]
struct GgDealsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: HashMap<String, Option<GgDealsEntry>>,
}

#[derive(Debug, Deserialize)]
struct GgDealsEntry {
    #[serde(default)]
    prices: Option<GgDealsPrices>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    currency: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GgDealsPrices {
    #[serde(default)]
    current_retail: Option<String>,
    #[serde(default)]
    current_keyshops: Option<String>,
    #[serde(default)]
    historical_retail: Option<String>,
    #[serde(default)]
    historical_keyshops: Option<String>,
}

/// Fold the service response into the overlay's price record. An
/// unsuccessful response, an unknown app id or a null entry is "no data".
fn map_response(response: &GgDealsResponse, app_id: &str) -> Option<PriceRecord> {
    if !response.success {
        warn!("pricing service reported an unsuccessful lookup");
        return None;
    }
    let entry = response.data.get(app_id)?.as_ref()?;
    let prices = entry.prices.as_ref()?;
    Some(PriceRecord {
        official_price: figure(&prices.current_retail),
        keyshop_price: figure(&prices.current_keyshops),
        historical_official: figure(&prices.historical_retail),
        historical_keyshop: figure(&prices.historical_keyshops),
        currency: entry.currency.clone(),
        source_url: entry.url.clone(),
    })
}

fn figure(value: &Option<String>) -> String {
    value
        .clone()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NO_DATA.to_string())
}
