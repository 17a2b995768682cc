use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::error;

use ccu_metrics::{Encoder, TextEncoder, UsageMetrics};

/// GET /metrics
///
/// Renders whatever the registry currently holds in the Prometheus text
/// exposition format. Empty until the first poll cycle has published.
pub async fn metrics_handler(State(metrics): State<Arc<UsageMetrics>>) -> Response {
    let families = metrics.gather();
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&families, &mut buffer) {
        error!("failed to encode metrics: {e}");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}
