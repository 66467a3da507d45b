use anyhow::Result;
use polars::frame::DataFrame;

use crate::config::Level;
use crate::diagnostics::Diagnostics;
use crate::grouping::{Counties, CustomGrouping};
use crate::resolve::Resolver;
use crate::table::{records_from_frame, resolve_records, RawRecord, ResolvedRecord};
use crate::taxonomy::{by_name, NUTS2, TRANSPORT};

use super::{aggregate, Aggregate};

/// One user table aggregated at every built-in level.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub records: Vec<ResolvedRecord>,
    pub county: Aggregate,
    pub nuts2: Aggregate,
    pub transport: Aggregate,
    pub diagnostics: Diagnostics,
}

impl Analysis {
    /// Aggregate for a built-in level; `None` for `Level::Custom`.
    pub fn get(&self, level: Level) -> Option<&Aggregate> {
        match level {
            Level::County => Some(&self.county),
            Level::Nuts2 => Some(&self.nuts2),
            Level::Transport => Some(&self.transport),
            Level::Custom => None,
        }
    }

    /// Aggregate the same records over a caller-defined grouping.
    ///
    /// Every record counts once, so a county with several rows weighs more than one
    /// with a single row. `custom_from_counties` averages the county means instead.
    pub fn custom(&self, grouping: &CustomGrouping) -> Aggregate {
        aggregate(&self.records, grouping)
    }

    /// Aggregate the county means over a caller-defined grouping: each county with
    /// data counts once, whatever its number of rows.
    pub fn custom_from_counties(&self, grouping: &CustomGrouping) -> Aggregate {
        let means = self.county.rows().iter()
            .filter_map(|row| by_name(&row.group_label).map(|region| ResolvedRecord {
                row: 0,
                identifier: region.code.to_string(),
                base_region: Some(region),
                value: Some(row.mean_value),
            }))
            .collect::<Vec<_>>();
        aggregate(&means, grouping)
    }

    /// Nothing resolved at any level.
    pub fn is_empty(&self) -> bool {
        self.county.is_empty() && self.nuts2.is_empty() && self.transport.is_empty()
    }
}

/// Resolve and aggregate caller-supplied rows.
pub fn analyze_records(records: &[RawRecord], value_column: &str) -> Analysis {
    let (records, diagnostics) = resolve_records(records, &Resolver::default(), value_column);
    Analysis {
        county: aggregate(&records, &Counties),
        nuts2: aggregate(&records, &NUTS2),
        transport: aggregate(&records, &TRANSPORT),
        records,
        diagnostics,
    }
}

/// Resolve and aggregate two named columns of a table.
pub fn analyze(df: &DataFrame, region_column: &str, value_column: &str) -> Result<Analysis> {
    let records = records_from_frame(df, region_column, value_column)?;
    Ok(analyze_records(&records, value_column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{sample_codes, sample_names};

    #[test]
    fn sample_tables_resolve_completely() {
        let codes = analyze(&sample_codes().unwrap(), "lan_kod", "befolkning").unwrap();
        let names = analyze(&sample_names().unwrap(), "lan_namn", "arbetslöshet").unwrap();
        for analysis in [&codes, &names] {
            assert!(analysis.diagnostics.is_empty());
            assert_eq!(analysis.county.len(), 21);
            assert_eq!(analysis.nuts2.len(), 8);
            assert_eq!(analysis.transport.len(), 6);
        }
        assert_eq!(codes.county.get("Stockholm").unwrap().mean_value, 2396599.0);
    }

    #[test]
    fn unresolved_rows_are_reported_not_fatal() {
        let raw = [RawRecord::number("99", 1.0), RawRecord::number("Atlantis", 2.0)];
        let analysis = analyze_records(&raw, "v");
        assert!(analysis.is_empty());
        assert_eq!(analysis.diagnostics.unresolved_identifiers(), ["99", "Atlantis"]);
        assert!(analysis.get(Level::Custom).is_none());
    }

    #[test]
    fn custom_uses_the_same_records() {
        let analysis = analyze(&sample_names().unwrap(), "lan_namn", "arbetslöshet").unwrap();
        let grouping = CustomGrouping::new().define_group("Ö", &["Stockholm", "Uppsala"]);
        let custom = analysis.custom(&grouping);
        assert!((custom.get("Ö").unwrap().mean_value - 6.65).abs() < 1e-9);
    }

    #[test]
    fn custom_weighting_by_record_or_by_county() {
        let records = vec![
            RawRecord::number("Stockholm", 10.0),
            RawRecord::number("01", 20.0),
            RawRecord::number("Uppsala", 30.0),
        ];
        let analysis = analyze_records(&records, "v");
        let grouping = CustomGrouping::new().define_group("Mitt", &["Stockholm", "Uppsala"]);

        let pooled = analysis.custom(&grouping);
        assert_eq!(pooled.get("Mitt").unwrap().mean_value, 20.0);
        assert_eq!(pooled.get("Mitt").unwrap().record_count, 3);

        let by_county = analysis.custom_from_counties(&grouping);
        assert_eq!(by_county.get("Mitt").unwrap().mean_value, 22.5);
        assert_eq!(by_county.get("Mitt").unwrap().record_count, 2);
    }
}
