use anyhow::{Context, Result};
use polars::{frame::DataFrame, prelude::DataType};

use crate::diagnostics::{Diagnostics, Warning};
use crate::resolve::Resolver;
use crate::taxonomy::BaseRegion;

/// A cell from the value column before numeric conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Missing,
}

/// One input row as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub region_identifier: String,
    pub value: RawValue,
}

impl RawRecord {
    pub fn new(region_identifier: impl Into<String>, value: RawValue) -> Self {
        Self { region_identifier: region_identifier.into(), value }
    }

    /// Convenience constructor for a numeric row.
    pub fn number(region_identifier: impl Into<String>, value: f64) -> Self {
        Self::new(region_identifier, RawValue::Number(value))
    }
}

/// A row after resolution. `base_region` is `None` for unresolved identifiers, `value`
/// is `None` for missing or non-numeric cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecord {
    pub row: usize,
    pub identifier: String,
    pub base_region: Option<&'static BaseRegion>,
    pub value: Option<f64>,
}

impl ResolvedRecord {
    /// The county and value, if this row can take part in aggregation.
    #[inline]
    pub fn usable(&self) -> Option<(&'static BaseRegion, f64)> {
        Some((self.base_region?, self.value?))
    }
}

impl RawValue {
    /// Convert to a finite number. Returns `Err` with the raw text when it does not parse.
    fn to_number(&self) -> std::result::Result<Option<f64>, &str> {
        match self {
            RawValue::Number(value) => Ok(value.is_finite().then_some(*value)),
            RawValue::Missing => Ok(None),
            RawValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() { return Ok(None) }
                match trimmed.parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(Some(value)),
                    Ok(_) => Ok(None),
                    Err(_) => Err(text),
                }
            }
        }
    }
}

/// Resolve every row. Unresolved identifiers and non-numeric values become warnings;
/// each row is handled independently of the others.
pub fn resolve_records(
    records: &[RawRecord],
    resolver: &Resolver,
    value_column: &str,
) -> (Vec<ResolvedRecord>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let resolved = records.iter().enumerate()
        .map(|(row, record)| {
            let base_region = resolver.resolve(&record.region_identifier).region();
            if base_region.is_none() {
                diagnostics.push(Warning::UnresolvedRegion {
                    row,
                    identifier: record.region_identifier.clone(),
                });
            }

            let value = record.value.to_number().unwrap_or_else(|raw| {
                diagnostics.push(Warning::NonNumericValue {
                    row,
                    column: value_column.to_string(),
                    raw: raw.to_string(),
                });
                None
            });

            ResolvedRecord { row, identifier: record.region_identifier.clone(), base_region, value }
        })
        .collect();
    (resolved, diagnostics)
}

/// Extract raw records from two caller-named columns of a DataFrame.
///
/// The region column is read as text (a null cell becomes an empty identifier). A text
/// value column is kept as text for per-cell parsing; any other type is cast to f64.
pub fn records_from_frame(df: &DataFrame, region_column: &str, value_column: &str) -> Result<Vec<RawRecord>> {
    let regions = df.column(region_column)
        .with_context(|| format!("[table::records] Region column '{region_column}' not found"))?
        .cast(&DataType::String)
        .with_context(|| format!("[table::records] Region column '{region_column}' cannot be read as text"))?;
    let values = df.column(value_column)
        .with_context(|| format!("[table::records] Value column '{value_column}' not found"))?;

    let identifiers = regions.str()?.into_iter()
        .map(|cell| cell.unwrap_or_default().to_string());

    let raw_values: Vec<RawValue> = if values.dtype() == &DataType::String {
        values.str()?.into_iter()
            .map(|cell| cell.map_or(RawValue::Missing, |text| RawValue::Text(text.to_string())))
            .collect()
    } else {
        values.cast(&DataType::Float64)
            .with_context(|| format!("[table::records] Value column '{value_column}' cannot be read as numbers"))?
            .f64()?
            .into_iter()
            .map(|cell| cell.map_or(RawValue::Missing, RawValue::Number))
            .collect()
    };

    Ok(identifiers.zip(raw_values)
        .map(|(identifier, value)| RawRecord::new(identifier, value))
        .collect())
}
