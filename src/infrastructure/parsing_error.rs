//! Error types for host-page and payload parsing.
//!
//! Every failure here degrades to "widget not shown"; nothing in this module
//! is fatal to the host page.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParsingError {
    #[error("price payload decode failed: {message} (payload prefix: {snippet:?})")]
    PayloadDecodeFailed { message: String, snippet: String },

    #[error("config blob '{attribute}' decode failed: {message}")]
    BlobDecodeFailed { attribute: String, message: String },

    #[error("region code {value:?} is not a two-letter code")]
    InvalidRegionCode { value: String },
}

impl ParsingError {
    /// Payload decode failure, keeping a short prefix of the offending text.
    pub fn payload_decode_failed(message: impl Into<String>, payload: &str) -> Self {
        Self::PayloadDecodeFailed {
            message: message.into(),
            snippet: payload.chars().take(80).collect(),
        }
    }

    pub fn blob_decode_failed(attribute: &str, message: impl Into<String>) -> Self {
        Self::BlobDecodeFailed {
            attribute: attribute.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_region_code(value: &str) -> Self {
        Self::InvalidRegionCode {
            value: value.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
