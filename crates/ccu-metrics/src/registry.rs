use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use prometheus::{Gauge, GaugeVec, Opts, Registry, proto::MetricFamily};

use ccu_model::UsageSnapshot;

/// Namespace prefix applied to every exported metric name.
pub const NAMESPACE: &str = "circleci_usage";

const REPONAME_LABEL: &str = "reponame";

/// The durable metric state of the exporter.
///
/// Created once at process start and shared between the collector loop
/// (writer) and the scrape handler (reader). Gauge cells are atomic, so
/// no locking is needed; a scrape landing mid-update observes the last
/// written value of each individual metric.
///
/// The gauges are created eagerly but stay invisible to scrapes until
/// [`UsageMetrics::publish_once`] registers them, which happens after the
/// first successful poll cycle.
#[derive(Clone)]
pub struct UsageMetrics {
    registry: Registry,
    published: Arc<AtomicBool>,

    active_users: Gauge,
    projects: Gauge,
    total_credits: Gauge,
    total_seconds: Gauge,

    per_project_credits: GaugeVec,
    per_project_seconds: GaugeVec,
    per_project_dlc_credits: GaugeVec,
    per_project_compute_credits: GaugeVec,
}

impl UsageMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        Ok(Self {
            registry: Registry::new(),
            published: Arc::new(AtomicBool::new(false)),

            active_users: gauge("active_users", "Active users")?,
            projects: gauge("projects", "Projects")?,
            total_credits: gauge("total_credits", "Total credits")?,
            total_seconds: gauge("total_seconds", "Total seconds")?,

            per_project_credits: per_project("per_project_credits", "Per project credits")?,
            per_project_seconds: per_project("per_project_seconds", "Per project seconds")?,
            per_project_dlc_credits: per_project(
                "per_project_dlc_credits",
                "Per project DLC credits",
            )?,
            per_project_compute_credits: per_project(
                "per_project_compute_credits",
                "Per project compute credits",
            )?,
        })
    }

    /// Overwrite every gauge with the values of one snapshot.
    ///
    /// Per-project series are upserted by project name; series for
    /// projects absent from this snapshot are left untouched and keep
    /// their last reported value.
    pub fn apply(&self, snapshot: &UsageSnapshot) {
        self.active_users.set(snapshot.active_users);
        self.projects.set(snapshot.projects);
        self.total_credits.set(snapshot.total_credits);
        self.total_seconds.set(snapshot.total_seconds);

        for project in &snapshot.by_project {
            let name = project.name.as_str();
            self.per_project_credits
                .with_label_values(&[name])
                .set(project.credits);
            self.per_project_seconds
                .with_label_values(&[name])
                .set(project.seconds);
            self.per_project_dlc_credits
                .with_label_values(&[name])
                .set(project.dlc_credits);
            self.per_project_compute_credits
                .with_label_values(&[name])
                .set(project.compute_credits);
        }
    }

    /// Register every gauge with the owned registry, exactly once.
    ///
    /// Registering the same collector twice is an error in the prometheus
    /// registry contract, so the registration is gated behind an atomic
    /// latch: the first call performs it, every later call is a no-op.
    pub fn publish_once(&self) -> Result<(), prometheus::Error> {
        if self.published.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        self.registry.register(Box::new(self.active_users.clone()))?;
        self.registry.register(Box::new(self.projects.clone()))?;
        self.registry.register(Box::new(self.total_credits.clone()))?;
        self.registry.register(Box::new(self.total_seconds.clone()))?;
        self.registry
            .register(Box::new(self.per_project_credits.clone()))?;
        self.registry
            .register(Box::new(self.per_project_seconds.clone()))?;
        self.registry
            .register(Box::new(self.per_project_dlc_credits.clone()))?;
        self.registry
            .register(Box::new(self.per_project_compute_credits.clone()))?;

        Ok(())
    }

    /// Current metric families for the scrape handler.
    ///
    /// Empty until [`UsageMetrics::publish_once`] has run.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }
}

fn gauge(name: &str, help: &str) -> Result<Gauge, prometheus::Error> {
    Gauge::with_opts(Opts::new(name, help).namespace(NAMESPACE))
}

fn per_project(name: &str, help: &str) -> Result<GaugeVec, prometheus::Error> {
    GaugeVec::new(Opts::new(name, help).namespace(NAMESPACE), &[REPONAME_LABEL])
}
