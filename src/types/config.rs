//! Run configuration passed into the report runner

use chrono::NaiveDate;
use std::path::PathBuf;

use super::{DateSpec, QuerySpec};

pub const DEFAULT_KEY_FILE: &str = "client_secrets.json";
pub const DEFAULT_KEY_ENV: &str = "GA_SERVICE";
pub const DEFAULT_TRENDING_OUTPUT: &str = "trending.json";
pub const DEFAULT_MOSTREAD_OUTPUT: &str = "mostread.json";
pub const DEFAULT_TRENDING_DAYS: u32 = 7;
pub const DEFAULT_DIMENSION: &str = "ga:pagePath";
pub const DEFAULT_METRICS: [&str; 2] = ["ga:pageviews", "ga:sessions"];
pub const DEFAULT_FILTER: &str = "ga:hostname==peacefulscience.org";
pub const DEFAULT_SORT: &str = "ga:pagePath";

/// First day the most-read report counts from
pub fn default_mostread_since() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default()
}

/// Where the service-account key comes from: file first, then env var
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSource {
    pub key_file: PathBuf,
    pub env_var: String,
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self {
            key_file: PathBuf::from(DEFAULT_KEY_FILE),
            env_var: DEFAULT_KEY_ENV.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub trending: PathBuf,
    pub mostread: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            trending: PathBuf::from(DEFAULT_TRENDING_OUTPUT),
            mostread: PathBuf::from(DEFAULT_MOSTREAD_OUTPUT),
        }
    }
}

/// Start dates of the two reports; both end today
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    pub trending_days: u32,
    pub mostread_since: NaiveDate,
}

impl QueryWindow {
    pub fn trending_start(&self) -> DateSpec {
        DateSpec::DaysAgo(self.trending_days)
    }

    pub fn mostread_start(&self) -> DateSpec {
        DateSpec::Date(self.mostread_since)
    }
}

impl Default for QueryWindow {
    fn default() -> Self {
        Self {
            trending_days: DEFAULT_TRENDING_DAYS,
            mostread_since: default_mostread_since(),
        }
    }
}

/// Dimension, metrics, filter and sort shared by both reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub dimension: String,
    pub metrics: Vec<String>,
    pub filter: Option<String>,
    pub sort: Option<String>,
}

impl ReportSettings {
    /// Build the query for `profile_id` starting at `start_date`, ending today
    pub fn query(&self, profile_id: &str, start_date: DateSpec) -> QuerySpec {
        QuerySpec {
            profile_id: profile_id.to_string(),
            start_date,
            end_date: DateSpec::Today,
            dimension: self.dimension.clone(),
            filter: self.filter.clone(),
            metrics: self.metrics.clone(),
            sort: self.sort.clone(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION.to_string(),
            metrics: DEFAULT_METRICS.iter().map(|m| m.to_string()).collect(),
            filter: Some(DEFAULT_FILTER.to_string()),
            sort: Some(DEFAULT_SORT.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub credentials: CredentialSource,
    pub outputs: OutputPaths,
    pub window: QueryWindow,
    pub report: ReportSettings,
}
