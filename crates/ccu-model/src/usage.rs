use serde::Deserialize;

use crate::errors::ModelError;

/// All values extracted from one poll cycle.
///
/// Lives only for the duration of the cycle: its values are copied into
/// the metric registry and the snapshot is dropped. Every field is
/// required; a response missing any of them fails the decode as a whole
/// rather than producing a partial snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSnapshot {
    pub active_users: f64,
    pub projects: f64,
    pub total_credits: f64,
    pub total_seconds: f64,
    pub by_project: Vec<ProjectUsage>,
}

/// Aggregates for a single project, keyed by its name.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectUsage {
    pub name: String,
    pub credits: f64,
    pub seconds: f64,
    pub dlc_credits: f64,
    pub compute_credits: f64,
}

impl UsageSnapshot {
    /// Decode a raw API response body.
    ///
    /// The traversal path is fixed: `data.plan.billingPeriods[0].metrics`.
    /// Shape errors anywhere on the path surface as a single decode
    /// failure; an empty `billingPeriods` array is its own error.
    pub fn from_json(body: &[u8]) -> Result<Self, ModelError> {
        let response: UsageResponse =
            serde_json::from_slice(body).map_err(ModelError::Decode)?;
        let period = response
            .data
            .plan
            .billing_periods
            .into_iter()
            .next()
            .ok_or(ModelError::NoBillingPeriod)?;

        let metrics = period.metrics;
        let by_project = metrics
            .by_project
            .nodes
            .into_iter()
            .map(|node| ProjectUsage {
                name: node.project.name,
                credits: node.aggregate.credits,
                seconds: node.aggregate.seconds,
                dlc_credits: node.aggregate.dlc_credits,
                compute_credits: node.aggregate.compute_credits,
            })
            .collect();

        Ok(Self {
            active_users: metrics.active_users.total_count,
            projects: metrics.projects.total_count,
            total_credits: metrics.total.credits,
            total_seconds: metrics.total.seconds,
            by_project,
        })
    }
}

// Schema-bound mirror of the API response. Kept private: callers only
// ever see the flattened snapshot.

#[derive(Debug, Deserialize)]
struct UsageResponse {
    data: ResponseData,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    plan: Plan,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Plan {
    billing_periods: Vec<BillingPeriod>,
}

#[derive(Debug, Deserialize)]
struct BillingPeriod {
    metrics: Metrics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Metrics {
    active_users: TotalCount,
    projects: TotalCount,
    total: Totals,
    by_project: ByProject,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TotalCount {
    total_count: f64,
}

#[derive(Debug, Deserialize)]
struct Totals {
    credits: f64,
    seconds: f64,
}

#[derive(Debug, Deserialize)]
struct ByProject {
    nodes: Vec<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    project: ProjectName,
    aggregate: Aggregate,
}

#[derive(Debug, Deserialize)]
struct ProjectName {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Aggregate {
    credits: f64,
    seconds: f64,
    dlc_credits: f64,
    compute_credits: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed_body() -> Vec<u8> {
        serde_json::json!({
            "data": {
                "plan": {
                    "billingPeriods": [{
                        "metrics": {
                            "activeUsers": { "totalCount": 42.0 },
                            "projects": { "totalCount": 5.0 },
                            "total": { "credits": 100.0, "seconds": 3600.0 },
                            "byProject": {
                                "nodes": [{
                                    "project": { "name": "svc-a" },
                                    "aggregate": {
                                        "credits": 10.0,
                                        "seconds": 360.0,
                                        "dlcCredits": 2.0,
                                        "computeCredits": 8.0
                                    }
                                }]
                            }
                        }
                    }]
                }
            }
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn decodes_well_formed_response() {
        let snapshot = UsageSnapshot::from_json(&well_formed_body()).unwrap();

        assert_eq!(snapshot.active_users, 42.0);
        assert_eq!(snapshot.projects, 5.0);
        assert_eq!(snapshot.total_credits, 100.0);
        assert_eq!(snapshot.total_seconds, 3600.0);
        assert_eq!(snapshot.by_project.len(), 1);

        let project = &snapshot.by_project[0];
        assert_eq!(project.name, "svc-a");
        assert_eq!(project.credits, 10.0);
        assert_eq!(project.seconds, 360.0);
        assert_eq!(project.dlc_credits, 2.0);
        assert_eq!(project.compute_credits, 8.0);
    }

    #[test]
    fn empty_billing_periods_is_an_error() {
        let body = serde_json::json!({
            "data": { "plan": { "billingPeriods": [] } }
        })
        .to_string();

        let err = UsageSnapshot::from_json(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelError::NoBillingPeriod));
    }

    #[test]
    fn missing_by_project_nodes_fails_the_decode() {
        let body = serde_json::json!({
            "data": {
                "plan": {
                    "billingPeriods": [{
                        "metrics": {
                            "activeUsers": { "totalCount": 42.0 },
                            "projects": { "totalCount": 5.0 },
                            "total": { "credits": 100.0, "seconds": 3600.0 },
                            "byProject": {}
                        }
                    }]
                }
            }
        })
        .to_string();

        let err = UsageSnapshot::from_json(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }

    #[test]
    fn wrong_field_type_fails_the_decode() {
        let body = serde_json::json!({
            "data": {
                "plan": {
                    "billingPeriods": [{
                        "metrics": {
                            "activeUsers": { "totalCount": "many" },
                            "projects": { "totalCount": 5.0 },
                            "total": { "credits": 100.0, "seconds": 3600.0 },
                            "byProject": { "nodes": [] }
                        }
                    }]
                }
            }
        })
        .to_string();

        let err = UsageSnapshot::from_json(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }

    #[test]
    fn not_json_fails_the_decode() {
        let err = UsageSnapshot::from_json(b"<html>nope</html>").unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }
}
