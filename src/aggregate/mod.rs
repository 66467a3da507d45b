//! Group-by mean of resolved records over a grouping.

mod analysis;
mod export;
mod summary;

use ahash::AHashMap;

use crate::grouping::{Grouping, GroupingKind};
use crate::table::ResolvedRecord;

pub use analysis::{analyze, analyze_records, Analysis};
pub use summary::Summary;

/// One output row per non-empty group.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub group_label: String,
    pub group_id: Option<String>,
    pub mean_value: f64,
    pub record_count: usize,  // Rows that contributed to the mean
    pub member_count: usize,  // Counties configured for the group
    pub regions: Vec<String>, // Configured county names
}

/// Aggregated rows for one grouping, in the order groups were first seen in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    kind: GroupingKind,
    rows: Vec<AggregateRow>,
}

impl Aggregate {
    #[inline] pub fn kind(&self) -> GroupingKind { self.kind }

    #[inline] pub fn rows(&self) -> &[AggregateRow] { &self.rows }

    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    /// No group received a usable row: nothing to visualize. A dataset of zeros is not empty.
    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn get(&self, label: &str) -> Option<&AggregateRow> {
        self.rows.iter().find(|row| row.group_label == label)
    }

    /// Rows ordered by descending mean; ties keep their input order.
    pub fn sorted_desc(&self) -> Vec<&AggregateRow> {
        let mut rows = self.rows.iter().collect::<Vec<_>>();
        rows.sort_by(|a, b| b.mean_value.total_cmp(&a.mean_value));
        rows
    }
}

/// Compute the mean value per group.
///
/// Rows without a county or without a numeric value are skipped, as are rows whose
/// county belongs to no group. A county in several custom groups counts toward each.
pub fn aggregate<G: Grouping + ?Sized>(records: &[ResolvedRecord], grouping: &G) -> Aggregate {
    let mut order: Vec<String> = Vec::new();
    let mut sums: AHashMap<String, (f64, usize)> = AHashMap::new();

    for (region, value) in records.iter().filter_map(ResolvedRecord::usable) {
        for label in grouping.labels_of(region) {
            let (sum, count) = sums.entry(label.to_string()).or_insert_with(|| {
                order.push(label.to_string());
                (0.0, 0)
            });
            *sum += value;
            *count += 1;
        }
    }

    let rows = order.into_iter()
        .map(|label| {
            let (sum, count) = sums[&label];
            let regions = grouping.members(&label).into_iter().map(str::to_string).collect::<Vec<_>>();
            AggregateRow {
                group_id: grouping.id_of(&label).map(str::to_string),
                mean_value: sum / count as f64,
                record_count: count,
                member_count: regions.len(),
                regions,
                group_label: label,
            }
        })
        .collect();

    Aggregate { kind: grouping.kind(), rows }
}
