//! Host-page and payload parsing.

pub mod context_resolver;
pub mod price_payload;

pub use context_resolver::ContextResolver;
pub use price_payload::parse_price_record;
