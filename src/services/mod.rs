//! Services for fetching, ranking and writing page reports

pub mod aggregator;
pub mod analytics;
pub mod auth;
pub mod credentials;
pub mod normalizer;
pub mod query;
pub mod report;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::Aggregator;
pub use analytics::{AnalyticsClient, ReportingApi};
pub use normalizer::normalize_path;
pub use query::fetch_all;
pub use report::{write_table, ReportRunner, RunSummary};
pub use resolver::resolve_profile_id;
