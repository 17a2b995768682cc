use serde::Serialize;

use crate::errors::ModelError;

/// Operation name sent alongside the usage query document.
pub const OPERATION_NAME: &str = "Usage";

/// The fixed usage query document. One variable, `orgId`; one billing
/// period; DLC-filtered project count; per-project aggregates.
pub const USAGE_QUERY: &str = r#"
query Usage($orgId: String!) {
  plan(orgId: $orgId) {
    billingPeriods(numPeriods: 1) {
      metrics {
        activeUsers {
          totalCount
        }
        projects(filter: {usingDLC: true}) {
          totalCount
        }
        total {
          credits
          seconds
        }
        byProject {
          nodes {
            aggregate {
              credits
              seconds
              dlcCredits
              computeCredits
            }
            project {
              name
            }
          }
        }
      }
    }
  }
}
"#;

/// One outbound GraphQL request body.
///
/// Built fresh every poll cycle and discarded after the request is sent.
/// The query document is fixed at the string level; only the organization
/// id varies, and it is passed through unvalidated (an empty id produces
/// an empty-variable request, not an error).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    operation_name: &'static str,
    variables: QueryVariables,
    query: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryVariables {
    org_id: String,
}

impl QueryRequest {
    /// Build the usage query for the given organization.
    pub fn usage(org_id: impl Into<String>) -> Self {
        Self {
            operation_name: OPERATION_NAME,
            variables: QueryVariables {
                org_id: org_id.into(),
            },
            query: USAGE_QUERY,
        }
    }

    /// Serialize into the JSON payload sent to the API.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
        serde_json::to_vec(self).map_err(ModelError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shape() {
        let request = QueryRequest::usage("org-1");
        let bytes = request.to_bytes().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["operationName"], "Usage");
        assert_eq!(value["variables"]["orgId"], "org-1");
        assert_eq!(value["query"], USAGE_QUERY);
    }

    #[test]
    fn empty_org_id_passes_through() {
        let request = QueryRequest::usage("");
        let bytes = request.to_bytes().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["variables"]["orgId"], "");
    }
}
