//! Error types for SSVC tree loading and timestamp handling.
//!
//! Lookups and vector decoding never fail; they report absence instead.
//! Only the edges that touch external data can produce an error.

/// Errors from the SSVC engine.
#[derive(Debug, thiserror::Error)]
pub enum SsvcError {
    #[error("decision tree parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid SSVC timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}
