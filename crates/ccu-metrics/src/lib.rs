//! Prometheus metric registry for the CircleCI usage exporter.
//!
//! This crate provides [`UsageMetrics`], the durable per-process registry that
//! the collector loop writes into and the scrape endpoint reads from.
//!
//! ## Example
//! ```rust
//! use ccu_metrics::UsageMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = UsageMetrics::new()?;
//!
//! // After the first successful poll cycle:
//! // metrics.apply(&snapshot);
//! // metrics.publish_once()?;
//!
//! // At scrape time:
//! let families = metrics.gather();
//! let encoder = prometheus::TextEncoder::new();
//! let mut buffer = vec![];
//! prometheus::Encoder::encode(&encoder, &families, &mut buffer)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! Namespace `circleci_usage`:
//! - `active_users`, `projects`, `total_credits`, `total_seconds` - Gauge
//! - `per_project_credits{reponame}`, `per_project_seconds{reponame}`,
//!   `per_project_dlc_credits{reponame}`, `per_project_compute_credits{reponame}` - GaugeVec
//!
//! ## HTTP Server
//! This crate does NOT provide an HTTP server for the `/metrics` endpoint.
//! Use your application's existing HTTP framework (axum, warp, etc).

mod registry;
pub use registry::{NAMESPACE, UsageMetrics};

pub use prometheus::{Encoder, Registry, TextEncoder};
