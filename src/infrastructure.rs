//! Infrastructure layer: host-page access, parsing, the pricing backend,
//! widget rendering, configuration and logging.

pub mod backend;
pub mod config;
pub mod credentials;
pub mod host_document;
pub mod logging;
pub mod parsing;
pub mod parsing_error;
pub mod widget;

// Re-export commonly used items
pub use backend::{GgDealsBackend, PricingBackend};
pub use config::OverlayConfig;
pub use credentials::CredentialStore;
pub use host_document::{HostDocument, ReadyState, StaticDocument};
pub use parsing::{ContextResolver, parse_price_record};
pub use parsing_error::{ParsingError, ParsingResult};
pub use widget::WidgetRenderer;
