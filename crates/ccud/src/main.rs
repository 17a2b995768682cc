use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::Context;
use axum::{Router, routing::get};
use tracing::info;

use ccu_collect::{Collector, CollectorConfig};
use ccu_metrics::UsageMetrics;
use ccu_observe::{LoggerConfig, logger_init};

mod scrape;

const ENV_ORG_ID: &str = "CIRCLECI_ORG_ID";
const ENV_API_TOKEN: &str = "CIRCLECI_API_TOKEN";
const BIND_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger_cfg = LoggerConfig::from_env()?;
    logger_init(&logger_cfg)?;

    let org_id = std::env::var(ENV_ORG_ID)
        .with_context(|| format!("{ENV_ORG_ID} is not set"))?;
    let api_token = std::env::var(ENV_API_TOKEN)
        .with_context(|| format!("{ENV_API_TOKEN} is not set"))?;

    // One registry per process, shared between the collector (writer)
    // and the scrape handler (reader).
    let metrics = Arc::new(UsageMetrics::new().context("failed to build metric registry")?);

    let config = CollectorConfig::new(org_id, api_token);
    info!(endpoint = %config.endpoint, interval = ?config.poll_interval, "collector configured");
    let collector = Collector::new(config, Arc::clone(&metrics))
        .context("failed to build http client")?;

    let app = Router::new()
        .route("/metrics", get(scrape::metrics_handler))
        .with_state(metrics);
    let listener = tokio::net::TcpListener::bind(BIND_ADDR)
        .await
        .with_context(|| format!("failed to bind {BIND_ADDR}"))?;
    info!(addr = BIND_ADDR, "serving /metrics");

    // No graceful shutdown path: whichever side fails first takes the
    // process down with a non-zero status and its diagnostic.
    tokio::select! {
        res = collector.run() => res.context("usage collection failed")?,
        res = axum::serve(listener, app).into_future() => {
            res.context("metrics server failed")?
        }
    }

    Ok(())
}
