//! Product and region resolution from the ambient host page.
//!
//! The product id comes from the URL path; the region code is attempted from
//! three sources in priority order, each failing independently. Resolution
//! yields either a complete context or nothing at all - logged-out and
//! non-standard pages are expected to fail here, silently.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::domain::ProductContext;
use crate::infrastructure::config::OverlayConfig;
use crate::infrastructure::host_document::HostDocument;
use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};

static APP_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/app/(\d+)").expect("valid app id pattern"));

/// Resolves the product/region pair the pricing call needs.
pub struct ContextResolver {
    config: OverlayConfig,
    cookie_pattern: Regex,
}

impl ContextResolver {
    pub fn new(config: OverlayConfig) -> Self {
        let cookie_pattern = Regex::new(&format!(
            r"{}=([A-Za-z]{{2}})",
            regex::escape(&config.country_cookie)
        ))
        .expect("valid cookie pattern");
        Self {
            config,
            cookie_pattern,
        }
    }

    /// Extract the product id and region code, or nothing when either is
    /// missing. Never a partial context, never an error.
    pub fn resolve(
        &self,
        current_url: &str,
        document: &dyn HostDocument,
    ) -> Option<ProductContext> {
        let product_id = extract_product_id(current_url)?;
        let region_code = self.resolve_region_code(document)?;
        Some(ProductContext::new(product_id, &region_code))
    }

    /// Region code by source priority: config blob, user-info blob, cookie.
    /// A malformed blob or a non-two-letter value fails that source only.
    fn resolve_region_code(&self, document: &dyn HostDocument) -> Option<String> {
        match self.region_from_blob(document, &self.config.config_attribute, "COUNTRY") {
            Ok(Some(code)) => return Some(code),
            Ok(None) => {}
            Err(e) => debug!("config blob region source failed: {e}"),
        }

        match self.region_from_blob(document, &self.config.userinfo_attribute, "country_code") {
            Ok(Some(code)) => return Some(code),
            Ok(None) => {}
            Err(e) => debug!("user-info blob region source failed: {e}"),
        }

        if let Some(code) = self.region_from_cookie(document) {
            return Some(code);
        }

        debug!("all region code sources failed");
        None
    }

    fn region_from_blob(
        &self,
        document: &dyn HostDocument,
        attribute: &str,
        field: &str,
    ) -> ParsingResult<Option<String>> {
        let Some(raw) = document.element_attribute(&self.config.config_element_id, attribute)
        else {
            return Ok(None);
        };
        let blob: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| ParsingError::blob_decode_failed(attribute, e.to_string()))?;
        match blob.get(field).and_then(|value| value.as_str()) {
            Some(value) => validate_region_code(value).map(Some),
            None => Ok(None),
        }
    }

    fn region_from_cookie(&self, document: &dyn HostDocument) -> Option<String> {
        let cookies = document.cookies();
        self.cookie_pattern
            .captures(&cookies)
            .map(|captures| captures[1].to_string())
    }
}

/// First digit run after an `/app/` path segment, if any.
pub fn extract_product_id(current_url: &str) -> Option<String> {
    // Match against the parsed path when the URL is well-formed, the raw
    // string otherwise (hosts occasionally hand over relative URLs).
    let haystack = Url::parse(current_url)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| current_url.to_string());
    APP_ID_PATTERN
        .captures(&haystack)
        .map(|captures| captures[1].to_string())
}

/// A region source only counts when it yields exactly two ASCII letters;
/// anything else fails that source and the next one is tried.
fn validate_region_code(value: &str) -> ParsingResult<String> {
    if value.len() == 2 && value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(value.to_string())
    } else {
        Err(ParsingError::invalid_region_code(value))
    }
}
