//! Aggregator service for ranking pages by their summed metrics

use crate::services::normalize_path;
use crate::types::{AggregatedEntry, PagestatsError, Result, ResultTable, Row};
use std::collections::BTreeMap;

/// Aggregator for turning report rows into a ranked table
pub struct Aggregator;

impl Aggregator {
    /// Group rows by normalized path, sum metrics element-wise, and rank by
    /// the first metric descending.
    ///
    /// Rows whose path normalizes to nothing are dropped. Entries with equal
    /// first metrics come out in ascending path order.
    pub fn aggregate(rows: &[Row]) -> Result<ResultTable> {
        let Some(first) = rows.first() else {
            return Ok(ResultTable::default());
        };
        let arity = first.metrics.len();

        // Ordered by path so the stable sort below breaks ties by path
        let mut groups: BTreeMap<&str, Vec<u64>> = BTreeMap::new();

        for row in rows {
            if row.metrics.len() != arity {
                return Err(PagestatsError::MetricArity {
                    expected: arity,
                    found: row.metrics.len(),
                });
            }

            let Some(path) = normalize_path(&row.dimension) else {
                continue;
            };

            let sums = groups.entry(path).or_insert_with(|| vec![0; arity]);
            for (sum, value) in sums.iter_mut().zip(&row.metrics) {
                *sum = sum.saturating_add(*value);
            }
        }

        let mut entries: Vec<AggregatedEntry> = groups
            .into_iter()
            .map(|(path, metrics)| AggregatedEntry {
                path: path.to_string(),
                metrics,
            })
            .collect();

        entries.sort_by(|a, b| b.primary().cmp(&a.primary()));

        Ok(ResultTable { entries })
    }
}
