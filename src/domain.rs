//! Domain module - core types of the price-overlay pipeline
//!
//! Each module is its own file in the domain/ directory; commonly used
//! items are re-exported here for convenience.

pub mod outcome;
pub mod price_record;
pub mod product;

pub use outcome::RenderOutcome;
pub use price_record::{NO_DATA, PriceRecord};
pub use product::ProductContext;
