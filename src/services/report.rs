//! Report runner: resolve the view, fetch both reports, rank, and write

use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::services::analytics::ReportingApi;
use crate::services::{fetch_all, resolve_profile_id, Aggregator};
use crate::types::{DateSpec, PagestatsError, Result, ResultTable, RunConfig};

/// Counts for one written report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub rows: usize,
    pub entries: usize,
}

/// Outcome of a full run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub profile_id: String,
    pub trending: ReportSummary,
    pub mostread: ReportSummary,
}

/// Runs the trending and most-read reports against one view
pub struct ReportRunner;

impl ReportRunner {
    /// Resolve the view, then fetch, rank and write both reports.
    ///
    /// `today` only bounds the configured start date; the queries themselves
    /// end at the API's own "today".
    pub fn run(api: &dyn ReportingApi, config: &RunConfig, today: NaiveDate) -> Result<RunSummary> {
        if config.window.mostread_since > today {
            return Err(PagestatsError::Config(format!(
                "most-read start date {} is after today ({})",
                config.window.mostread_since, today
            )));
        }

        let profile_id = resolve_profile_id(api)?.ok_or(PagestatsError::NoProfile)?;

        let trending = Self::run_one(
            api,
            config,
            &profile_id,
            config.window.trending_start(),
            &config.outputs.trending,
        )?;
        let mostread = Self::run_one(
            api,
            config,
            &profile_id,
            config.window.mostread_start(),
            &config.outputs.mostread,
        )?;

        Ok(RunSummary {
            profile_id,
            trending,
            mostread,
        })
    }

    fn run_one(
        api: &dyn ReportingApi,
        config: &RunConfig,
        profile_id: &str,
        start_date: DateSpec,
        output: &Path,
    ) -> Result<ReportSummary> {
        let query = config.report.query(profile_id, start_date);
        let rows = fetch_all(api, &query)?;
        let table = Aggregator::aggregate(&rows)?;

        write_table(output, &table)?;
        tracing::info!(
            start_date = %start_date,
            rows = rows.len(),
            entries = table.len(),
            path = %output.display(),
            "wrote report"
        );

        Ok(ReportSummary {
            rows: rows.len(),
            entries: table.len(),
        })
    }
}

/// Write `table` as a JSON array of `[path, metric, ...]` arrays, indented
/// by one space per level.
pub fn write_table(path: &Path, table: &ResultTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    table.serialize(&mut serializer)?;

    fs::write(path, buf)?;
    Ok(())
}
