//! Report types: query specifications, raw rows, and ranked tables

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

use super::{PagestatsError, Result};

/// Namespace token the reporting API expects in front of a view id
pub const PROFILE_NAMESPACE: &str = "ga:";

/// Date in the reporting API's grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpec {
    Today,
    DaysAgo(u32),
    Date(NaiveDate),
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSpec::Today => f.write_str("today"),
            DateSpec::DaysAgo(n) => write!(f, "{}daysAgo", n),
            DateSpec::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// One logical report query. Only the page offset changes between page
/// requests, and that lives on `PageRequest`, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub profile_id: String,
    pub start_date: DateSpec,
    pub end_date: DateSpec,
    pub dimension: String,
    pub filter: Option<String>,
    pub metrics: Vec<String>,
    pub sort: Option<String>,
}

impl QuerySpec {
    /// Namespaced view identifier (`ga:<id>`)
    pub fn ids(&self) -> String {
        format!("{}{}", PROFILE_NAMESPACE, self.profile_id)
    }

    /// Comma-joined metric list as sent to the API
    pub fn metrics_param(&self) -> String {
        self.metrics.join(",")
    }

    /// Same query over a different start date
    pub fn with_start_date(&self, start_date: DateSpec) -> Self {
        Self {
            start_date,
            ..self.clone()
        }
    }
}

/// One report row: the dimension value followed by its metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub dimension: String,
    pub metrics: Vec<u64>,
}

impl Row {
    pub fn new(dimension: impl Into<String>, metrics: Vec<u64>) -> Self {
        Self {
            dimension: dimension.into(),
            metrics,
        }
    }

    /// Convert a raw API row (all cells are strings) into a typed row.
    pub fn from_raw(cells: Vec<String>) -> Result<Self> {
        let mut cells = cells.into_iter();
        let dimension = cells
            .next()
            .ok_or_else(|| PagestatsError::Parse("empty row".into()))?;

        let metrics = cells
            .map(|cell| {
                cell.trim().parse::<u64>().map_err(|e| {
                    PagestatsError::Parse(format!(
                        "metric {:?} for {:?} is not a count: {}",
                        cell, dimension, e
                    ))
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        Ok(Self { dimension, metrics })
    }
}

/// A normalized path with its summed metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedEntry {
    pub path: String,
    pub metrics: Vec<u64>,
}

impl AggregatedEntry {
    /// First metric, the ranking key
    pub fn primary(&self) -> u64 {
        self.metrics.first().copied().unwrap_or(0)
    }
}

/// Serialized as a flat `[path, m1, m2, ...]` array
impl Serialize for AggregatedEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1 + self.metrics.len()))?;
        seq.serialize_element(&self.path)?;
        for metric in &self.metrics {
            seq.serialize_element(metric)?;
        }
        seq.end()
    }
}

impl From<&AggregatedEntry> for Row {
    fn from(entry: &AggregatedEntry) -> Self {
        Row::new(entry.path.clone(), entry.metrics.clone())
    }
}

/// Entries ranked by descending first metric, unique by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub entries: Vec<AggregatedEntry>,
}

impl ResultTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Each entry as a single row, for feeding a table back into aggregation
    pub fn to_rows(&self) -> Vec<Row> {
        self.entries.iter().map(Row::from).collect()
    }
}

impl Serialize for ResultTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
