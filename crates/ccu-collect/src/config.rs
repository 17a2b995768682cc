use std::time::Duration;

/// The usage API endpoint.
pub const USAGE_API_URL: &str = "https://circleci.com/graphql-unstable";

#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Where the usage query is POSTed.
    pub endpoint: String,
    /// Organization identifier, passed verbatim as the `orgId` variable.
    pub org_id: String,
    /// API token, sent verbatim in the `Authorization` header (no
    /// `Bearer` prefix).
    pub api_token: String,
    /// Fixed delay between the end of one cycle and the start of the
    /// next. A slow cycle shifts the schedule; there is no catch-up.
    pub poll_interval: Duration,
    /// Upper bound on one network round-trip. A timeout is fatal, like
    /// every other transport failure.
    pub request_timeout: Duration,
}

impl CollectorConfig {
    pub fn new(org_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            endpoint: USAGE_API_URL.to_string(),
            org_id: org_id.into(),
            api_token: api_token.into(),
            poll_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
        }
    }
}
