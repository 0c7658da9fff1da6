//! Resolved product-page identity.

use serde::{Deserialize, Serialize};

/// The product and region the pricing call is made for.
///
/// Both fields are required for the pipeline to proceed; when either cannot
/// be determined the resolver yields no context at all, never a partial one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductContext {
    /// Numeric token extracted from the `/app/<digits>` URL path segment.
    pub product_id: String,
    /// Two-letter region code, lower-cased for the outbound call.
    pub region_code: String,
}

impl ProductContext {
    /// Build a context, normalizing the region to its outbound form.
    pub fn new(product_id: impl Into<String>, region_code: &str) -> Self {
        Self {
            product_id: product_id.into(),
            region_code: region_code.to_ascii_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_code_is_lower_cased_for_the_outbound_call() {
        let context = ProductContext::new("730", "DE");
        assert_eq!(context.product_id, "730");
        assert_eq!(context.region_code, "de");
    }
}
