//! bestprice - storefront price-comparison overlay engine
//!
//! Augments a third-party storefront product page with price-comparison data
//! from GG.deals: resolves the product and region from the ambient page,
//! fetches a price record through an opaque backend bridge, and mounts a
//! de-duplicated widget into a host document the overlay does not control.

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the surface embedding hosts actually touch
pub use application::PageLifecycleController;
pub use domain::{PriceRecord, ProductContext, RenderOutcome};
pub use infrastructure::{
    CredentialStore, GgDealsBackend, HostDocument, OverlayConfig, PricingBackend, StaticDocument,
};
