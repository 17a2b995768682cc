use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, info};

use ccu_metrics::UsageMetrics;
use ccu_model::{QueryRequest, UsageSnapshot};

use crate::config::CollectorConfig;
use crate::errors::CollectError;

/// The collector loop.
///
/// One sequential loop, one cycle in flight at a time: build the usage
/// query, POST it, decode the snapshot, write it into the registry,
/// sleep the fixed interval, repeat. The first cycle runs immediately at
/// start; the registry is registered for scraping right after the first
/// successful cycle and never again.
pub struct Collector {
    config: CollectorConfig,
    metrics: Arc<UsageMetrics>,
    client: reqwest::Client,
}

impl Collector {
    pub fn new(
        config: CollectorConfig,
        metrics: Arc<UsageMetrics>,
    ) -> Result<Self, CollectError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            config,
            metrics,
            client,
        })
    }

    /// Run the loop until a cycle fails.
    ///
    /// Returns only on error; every cycle failure is unrecovered and the
    /// caller is expected to exit the process with it (crash-and-restart
    /// operation, supervisor assumed outside).
    pub async fn run(&self) -> Result<(), CollectError> {
        let mut published = false;

        loop {
            let snapshot = self.poll_once().await?;
            debug!(
                active_users = snapshot.active_users,
                projects = snapshot.by_project.len(),
                "snapshot collected"
            );
            self.metrics.apply(&snapshot);

            if !published {
                self.metrics.publish_once()?;
                published = true;
                info!("usage metrics registered for scraping");
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// One full cycle: build, send, decode.
    async fn poll_once(&self) -> Result<UsageSnapshot, CollectError> {
        let body = QueryRequest::usage(self.config.org_id.as_str()).to_bytes()?;

        debug!(endpoint = %self.config.endpoint, "sending usage query");
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(AUTHORIZATION, self.config.api_token.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::Status(status));
        }

        let bytes = response.bytes().await?;
        Ok(UsageSnapshot::from_json(&bytes)?)
    }
}
