use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

use crate::services::auth::{self, ANALYTICS_READONLY_SCOPE};
use crate::services::{credentials, AnalyticsClient, ReportRunner};
use crate::types::{
    CredentialSource, OutputPaths, QueryWindow, ReportSettings, RunConfig, DEFAULT_DIMENSION,
    DEFAULT_FILTER, DEFAULT_KEY_ENV, DEFAULT_KEY_FILE, DEFAULT_MOSTREAD_OUTPUT, DEFAULT_SORT,
    DEFAULT_TRENDING_DAYS, DEFAULT_TRENDING_OUTPUT,
};

/// Rank site pages by views into trending.json and mostread.json.
///
/// Every option has a default; running with no arguments produces both
/// reports in the current directory.
#[derive(Parser, Debug)]
#[command(name = "pagestats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Service-account key file, tried first
    #[arg(long, env = "PAGESTATS_KEY_FILE", default_value = DEFAULT_KEY_FILE)]
    key_file: PathBuf,

    /// Environment variable holding the key JSON, tried when the file fails
    #[arg(long, env = "PAGESTATS_KEY_ENV", default_value = DEFAULT_KEY_ENV)]
    key_env: String,

    /// Output path of the trending report
    #[arg(long, env = "PAGESTATS_TRENDING_OUTPUT", default_value = DEFAULT_TRENDING_OUTPUT)]
    trending_output: PathBuf,

    /// Output path of the most-read report
    #[arg(long, env = "PAGESTATS_MOSTREAD_OUTPUT", default_value = DEFAULT_MOSTREAD_OUTPUT)]
    mostread_output: PathBuf,

    /// Days covered by the trending report
    #[arg(
        long,
        env = "PAGESTATS_TRENDING_DAYS",
        default_value_t = DEFAULT_TRENDING_DAYS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    trending_days: u32,

    /// First day (YYYY-MM-DD) counted by the most-read report
    #[arg(long, env = "PAGESTATS_SINCE", default_value = "2015-01-01")]
    since: NaiveDate,

    /// Dimension to group by
    #[arg(long, env = "PAGESTATS_DIMENSION", default_value = DEFAULT_DIMENSION)]
    dimension: String,

    /// Comma-separated metrics; the first one ranks the table
    #[arg(
        long,
        env = "PAGESTATS_METRICS",
        value_delimiter = ',',
        default_value = "ga:pageviews,ga:sessions"
    )]
    metrics: Vec<String>,

    /// Report filter expression (empty for none)
    #[arg(long, env = "PAGESTATS_FILTER", default_value = DEFAULT_FILTER)]
    filter: String,

    /// Sort key sent with each query (empty for none)
    #[arg(long, env = "PAGESTATS_SORT", default_value = DEFAULT_SORT)]
    sort: String,
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Cli {
    /// Resolve arguments into a run configuration
    pub fn config(&self) -> RunConfig {
        RunConfig {
            credentials: CredentialSource {
                key_file: self.key_file.clone(),
                env_var: self.key_env.clone(),
            },
            outputs: OutputPaths {
                trending: self.trending_output.clone(),
                mostread: self.mostread_output.clone(),
            },
            window: QueryWindow {
                trending_days: self.trending_days,
                mostread_since: self.since,
            },
            report: ReportSettings {
                dimension: self.dimension.clone(),
                metrics: self
                    .metrics
                    .iter()
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect(),
                filter: non_empty(self.filter.clone()),
                sort: non_empty(self.sort.clone()),
            },
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = self.config();
        if config.report.metrics.is_empty() {
            anyhow::bail!("at least one metric is required");
        }

        let key = credentials::load_key(&config.credentials)?;
        let token = auth::authorize(&key, ANALYTICS_READONLY_SCOPE)?;
        let client = AnalyticsClient::new(token)?;

        let summary = ReportRunner::run(&client, &config, Local::now().date_naive())?;
        tracing::info!(
            profile = %summary.profile_id,
            trending = summary.trending.entries,
            mostread = summary.mostread.entries,
            "reports written"
        );
        Ok(())
    }
}
