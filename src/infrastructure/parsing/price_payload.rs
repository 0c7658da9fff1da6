//! Decoding of the serialized price payload.

use crate::domain::PriceRecord;
use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};

/// Decode a serialized price record.
///
/// Missing fields default to the `"N/A"` sentinel; a structurally malformed
/// payload is a reported failure, never a crash. The caller logs it and
/// aborts the render step only.
pub fn parse_price_record(payload: &str) -> ParsingResult<PriceRecord> {
    serde_json::from_str(payload)
        .map_err(|e| ParsingError::payload_decode_failed(e.to_string(), payload))
}
