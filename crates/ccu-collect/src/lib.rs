mod config;
pub use config::CollectorConfig;
pub use config::USAGE_API_URL;

mod poll;
pub use poll::Collector;

mod errors;
pub use errors::CollectError;
