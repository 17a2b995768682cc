use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to encode usage query: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode usage response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("usage response contains no billing periods")]
    NoBillingPeriod,
}
