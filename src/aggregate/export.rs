use anyhow::Result;
use polars::{frame::DataFrame, prelude::{Column, NamedFrom}, series::Series};

use crate::grouping::GroupingKind;

use super::Aggregate;

impl Aggregate {
    /// Tabular form for export. Columns: `group_label`, `mean_value`, and for custom
    /// groupings also `regions` (comma-separated) and `region_count`.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let labels = self.rows.iter().map(|row| row.group_label.as_str()).collect::<Vec<_>>();
        let values = self.rows.iter().map(|row| row.mean_value).collect::<Vec<_>>();

        let mut columns: Vec<Column> = vec![
            Series::new("group_label".into(), labels).into(),
            Series::new("mean_value".into(), values).into(),
        ];

        if self.kind == GroupingKind::Custom {
            let regions = self.rows.iter().map(|row| row.regions.join(", ")).collect::<Vec<_>>();
            let counts = self.rows.iter().map(|row| row.member_count as u32).collect::<Vec<_>>();
            columns.push(Series::new("regions".into(), regions).into());
            columns.push(Series::new("region_count".into(), counts).into());
        }

        Ok(DataFrame::new(columns)?)
    }
}
