mod query;
pub use query::{OPERATION_NAME, QueryRequest, USAGE_QUERY};

mod usage;
pub use usage::{ProjectUsage, UsageSnapshot};

mod errors;
pub use errors::ModelError;
