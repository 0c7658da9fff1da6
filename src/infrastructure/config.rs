//! Fixed host identities and pricing-service endpoints.
//!
//! The overlay does not own the page it decorates; everything it needs to
//! find there is named here, with defaults matching the Steam storefront.

use serde::{Deserialize, Serialize};

/// Steam storefront constants the overlay reads or anchors on.
pub mod storefront {
    /// Path segment identifying a product page.
    pub const APP_PATH_SEGMENT: &str = "/app/";
    /// Element carrying the page configuration blobs.
    pub const CONFIG_ELEMENT_ID: &str = "application_config";
    /// Attribute with the page configuration JSON (field `COUNTRY`).
    pub const CONFIG_ATTRIBUTE: &str = "data-config";
    /// Attribute with the user-info JSON (field `country_code`).
    pub const USERINFO_ATTRIBUTE: &str = "data-userinfo";
    /// Cookie carrying a two-letter region value.
    pub const COUNTRY_COOKIE: &str = "steamCountry";
    /// Purchase box the widget is inserted immediately before.
    pub const ANCHOR_ELEMENT_ID: &str = "game_area_purchase";
}

/// GG.deals API constants.
pub mod ggdeals {
    pub const API_BASE_URL: &str = "https://api.gg.deals";
    /// Prices-by-Steam-app-id endpoint, relative to the base URL.
    pub const PRICES_BY_STEAM_APP_ID: &str = "/v1/prices/by-steam-app-id/";
}

/// Identities and labels used when reading the host page and mounting the
/// widget. Hosts with a different layout re-point these; the defaults match
/// the Steam storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Element carrying the configuration blobs.
    pub config_element_id: String,
    /// Attribute holding the page configuration JSON.
    pub config_attribute: String,
    /// Attribute holding the user-info JSON.
    pub userinfo_attribute: String,
    /// Cookie name carrying the region value.
    pub country_cookie: String,
    /// Element the widget is inserted immediately before.
    pub anchor_element_id: String,
    /// Fixed identity of the widget container (idempotence guard).
    pub widget_element_id: String,
    /// Fixed identity of the injected stylesheet block.
    pub style_element_id: String,
    /// Static title shown in the widget header.
    pub widget_title: String,
    /// Text of the attribution link back to the pricing provider.
    pub attribution_label: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            config_element_id: storefront::CONFIG_ELEMENT_ID.to_string(),
            config_attribute: storefront::CONFIG_ATTRIBUTE.to_string(),
            userinfo_attribute: storefront::USERINFO_ATTRIBUTE.to_string(),
            country_cookie: storefront::COUNTRY_COOKIE.to_string(),
            anchor_element_id: storefront::ANCHOR_ELEMENT_ID.to_string(),
            widget_element_id: "gtbp-price-widget".to_string(),
            style_element_id: "gtbp-styles".to_string(),
            widget_title: "Prices by GG.deals".to_string(),
            attribution_label: "View on GG.deals".to_string(),
        }
    }
}
