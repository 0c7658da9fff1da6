//! Price widget rendering and stylesheet injection.
//!
//! Both mutations are idempotent against the document itself: fixed element
//! identities are existence-checked before anything is inserted, so repeated
//! invocations within one document lifetime never accumulate duplicates.
//! The document is the authoritative mount state; there are no in-memory
//! flags to go stale.

use tracing::{debug, warn};

use crate::domain::{NO_DATA, PriceRecord, RenderOutcome};
use crate::infrastructure::config::OverlayConfig;
use crate::infrastructure::host_document::HostDocument;

/// Stylesheet for the price widget, injected once per document.
pub const WIDGET_CSS: &str = r#"
    #gtbp-price-widget {
        background-color: #1a2c3d;
        font-family: 'Tenorite', 'Motiva Sans', sans-serif;
        padding: 10px 16px;
        margin-bottom: 10px;
        border-radius: 3px;
        font-size: 14px;
        display: grid;
        grid-template-columns: 1fr 1fr;
        gap: 6px 16px;
    }
    .gtbp-header {
        grid-column: 1 / -1;
        color: #ffffff;
        font-size: 16px;
        padding-bottom: 6px;
        margin-bottom: 6px;
        border-bottom: 1px solid #2a475e;
        display: flex;
        justify-content: space-between;
        align-items: center;
    }
    .gtbp-header .header-title {
        font-weight: 700;
    }
    .gtbp-header a {
        color: #5d92b8;
        text-decoration: none;
        font-size: 12px;
        font-weight: 500;
    }
    .gtbp-header a:hover {
        color: #ffffff;
        text-decoration: underline;
    }
    .gtbp-price-row {
        display: flex;
        align-items: center;
        line-height: 1.4;
    }
    .gtbp-price-row .label {
        color: #5d92b8;
        font-weight: 500;
        min-width: 120px;
        display: inline-block;
    }
    .gtbp-price-row .value {
        color: #ffffff;
        font-weight: 700;
        margin-left: 8px;
    }
"#;

/// Builds the widget fragment and mounts it exactly once per document.
pub struct WidgetRenderer {
    config: OverlayConfig,
}

impl WidgetRenderer {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    /// Append the widget stylesheet unless it is already present. Safe to
    /// call any number of times per document lifetime.
    pub fn ensure_styles(&self, document: &mut dyn HostDocument) {
        if document.has_element(&self.config.style_element_id) {
            return;
        }
        document.append_head_style(&self.config.style_element_id, WIDGET_CSS);
        debug!("injected widget stylesheet");
    }

    /// Mount the widget immediately before the anchor element.
    ///
    /// Checks run strictly in this order: mount guard, anchor presence, data
    /// presence. The guard comes first so redundant invocations can never
    /// produce duplicate nodes, and a missing anchor is reported as a layout
    /// problem rather than masked as missing data.
    pub fn render(&self, record: &PriceRecord, document: &mut dyn HostDocument) -> RenderOutcome {
        if document.has_element(&self.config.widget_element_id) {
            debug!("price widget already mounted, skipping");
            return RenderOutcome::SkippedAlreadyMounted;
        }
        if !document.has_element(&self.config.anchor_element_id) {
            warn!(
                anchor = %self.config.anchor_element_id,
                "anchor element not found, widget not mounted"
            );
            return RenderOutcome::SkippedNoAnchor;
        }
        let Some(fragment) = self.build_fragment(record) else {
            debug!("no prices to display");
            return RenderOutcome::SkippedNoData;
        };
        if !document.insert_before(
            &self.config.anchor_element_id,
            &self.config.widget_element_id,
            &fragment,
        ) {
            warn!("anchor element disappeared before insertion");
            return RenderOutcome::SkippedNoAnchor;
        }
        debug!("mounted price widget");
        RenderOutcome::Inserted
    }

    /// The widget container, or nothing when every price row is sentinel.
    /// An attribution-only widget with no prices is considered noise.
    fn build_fragment(&self, record: &PriceRecord) -> Option<String> {
        let rows: Vec<String> = [
            ("Official", &record.official_price, "official"),
            ("Historical Official", &record.historical_official, "hist-official"),
            ("Keyshop", &record.keyshop_price, "keyshop"),
            ("Historical Keyshop", &record.historical_keyshop, "hist-keyshop"),
        ]
        .into_iter()
        .filter_map(|(label, price, css_class)| {
            price_row(label, price, &record.currency, css_class)
        })
        .collect();

        if rows.is_empty() {
            return None;
        }

        // Required by the pricing provider's API terms whenever a source URL
        // is given; part of the header, not independently removable.
        let attribution = if record.source_url.is_empty() {
            String::new()
        } else {
            format!(
                r#"<a href="{}" target="_blank">{}</a>"#,
                record.source_url, self.config.attribution_label
            )
        };

        Some(format!(
            r#"<div id="{id}"><div class="gtbp-header"><span class="header-title">{title}</span>{attribution}</div>{rows}</div>"#,
            id = self.config.widget_element_id,
            title = self.config.widget_title,
            attribution = attribution,
            rows = rows.concat(),
        ))
    }
}

/// One labelled price row, omitted when the figure is the sentinel.
fn price_row(label: &str, price: &str, currency: &str, css_class: &str) -> Option<String> {
    if price == NO_DATA {
        return None;
    }
    Some(format!(
        r#"<div class="gtbp-price-row {css_class}"><span class="label">{label}:</span><span class="value">{price} {currency}</span></div>"#
    ))
}
