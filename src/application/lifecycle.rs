//! Page lifecycle control: gating, readiness, and pipeline sequencing.
//!
//! One controller serves one document lifetime. Execution is gated to
//! product pages and deferred until the document has loaded; the pipeline
//! then runs exactly once: styles, context, fetch, parse, render. Every
//! failure on the way degrades to "widget not shown" - nothing here is
//! allowed to fault the host page.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::RenderOutcome;
use crate::infrastructure::backend::PricingBackend;
use crate::infrastructure::config::{OverlayConfig, storefront};
use crate::infrastructure::host_document::{HostDocument, ReadyState};
use crate::infrastructure::parsing::{ContextResolver, parse_price_record};
use crate::infrastructure::widget::WidgetRenderer;

/// Execution state of one document lifetime. Explicit so the run happens
/// exactly once no matter how many readiness notifications the host fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Waiting,
    Ran,
}

/// Entry point of the overlay.
pub struct PageLifecycleController {
    backend: Arc<dyn PricingBackend>,
    resolver: ContextResolver,
    renderer: WidgetRenderer,
    state: RunState,
}

impl PageLifecycleController {
    pub fn new(backend: Arc<dyn PricingBackend>, config: OverlayConfig) -> Self {
        Self {
            backend,
            resolver: ContextResolver::new(config.clone()),
            renderer: WidgetRenderer::new(config),
            state: RunState::Waiting,
        }
    }

    /// Attach to a freshly observed page. Runs the pipeline immediately when
    /// the document is already loaded; otherwise the host calls
    /// [`Self::notify_loaded`] once its load signal fires.
    pub async fn attach(&mut self, current_url: &str, document: &mut dyn HostDocument) {
        if !is_product_page(current_url) {
            debug!("not a product page, overlay inactive");
            return;
        }
        if document.ready_state() == ReadyState::Complete {
            self.run_once(current_url, document).await;
        }
    }

    /// Load-completion signal from the host. Redundant signals are no-ops.
    pub async fn notify_loaded(&mut self, current_url: &str, document: &mut dyn HostDocument) {
        if !is_product_page(current_url) {
            return;
        }
        self.run_once(current_url, document).await;
    }

    async fn run_once(&mut self, current_url: &str, document: &mut dyn HostDocument) {
        if self.state == RunState::Ran {
            return;
        }
        self.state = RunState::Ran;

        // Styles go in regardless of whether a widget ever renders
        self.renderer.ensure_styles(document);

        let Some(context) = self.resolver.resolve(current_url, document) else {
            debug!("no product context resolved, overlay inactive");
            return;
        };

        let payload = match self
            .backend
            .get_ggdeals_prices(&context.product_id, &context.region_code)
            .await
        {
            Ok(Some(payload)) if !payload.is_empty() => payload,
            Ok(_) => {
                debug!(app_id = %context.product_id, "backend returned no price data");
                return;
            }
            Err(e) => {
                warn!("price lookup failed: {e:#}");
                return;
            }
        };

        let record = match parse_price_record(&payload) {
            Ok(record) => record,
            Err(e) => {
                warn!("discarding malformed price payload: {e}");
                return;
            }
        };

        match self.renderer.render(&record, document) {
            RenderOutcome::Inserted => {
                info!(app_id = %context.product_id, "price widget mounted");
            }
            outcome => debug!(?outcome, "price widget not mounted"),
        }
    }
}

/// Product pages are identified by an `/app/` segment in the URL.
fn is_product_page(current_url: &str) -> bool {
    current_url.contains(storefront::APP_PATH_SEGMENT)
}
