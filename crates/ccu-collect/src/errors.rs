use thiserror::Error;

use ccu_model::ModelError;

/// A problem in one poll cycle. Every variant is fatal to the process:
/// the loop does not retry and does not publish partial data.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("usage query failed: {0}")]
    Model(#[from] ModelError),

    #[error("usage api request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("usage api returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("metric registration failed: {0}")]
    Register(#[from] prometheus::Error),
}
