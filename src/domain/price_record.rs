//! Decoded price figures and metadata for one product/region pair.

use serde::{Deserialize, Serialize};

/// Sentinel the pricing service uses for "no figure available".
pub const NO_DATA: &str = "N/A";

fn no_data() -> String {
    NO_DATA.to_string()
}

/// One price record as decoded from the backend payload.
///
/// All price fields are decimal-amount strings or the [`NO_DATA`] sentinel;
/// a sentinel field renders no row. Serde names follow the wire payload, so
/// missing fields decode to the sentinel rather than failing the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(default = "no_data")]
    pub official_price: String,
    #[serde(default = "no_data")]
    pub keyshop_price: String,
    #[serde(default = "no_data")]
    pub historical_official: String,
    #[serde(default = "no_data", rename = "historical_keyshops")]
    pub historical_keyshop: String,
    #[serde(default)]
    pub currency: String,
    /// Attribution link back to the pricing provider. Whenever non-empty it
    /// must appear in the rendered widget (provider terms of use).
    #[serde(default, rename = "url")]
    pub source_url: String,
}

impl PriceRecord {
    /// True when at least one price field carries a figure. An all-sentinel
    /// record is equivalent to "no data" and must render nothing.
    pub fn has_renderable_prices(&self) -> bool {
        [
            &self.official_price,
            &self.historical_official,
            &self.keyshop_price,
            &self.historical_keyshop,
        ]
        .into_iter()
        .any(|price| price != NO_DATA)
    }
}

impl Default for PriceRecord {
    fn default() -> Self {
        Self {
            official_price: no_data(),
            keyshop_price: no_data(),
            historical_official: no_data(),
            historical_keyshop: no_data(),
            currency: String::new(),
            source_url: String::new(),
        }
    }
}
