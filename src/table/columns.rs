use std::sync::OnceLock;

use polars::{frame::DataFrame, prelude::DataType};
use regex::Regex;

/// Column names that look like they hold county codes or names, in frame order.
/// Falls back to the first column when nothing matches.
pub fn region_column_candidates(df: &DataFrame) -> Vec<String> {
    static HINTS: OnceLock<Regex> = OnceLock::new();
    let hints = HINTS.get_or_init(|| Regex::new(r"(?i)lan|län|region|county|code|kod|namn").unwrap());

    let names = df.get_column_names();
    let candidates = names.iter()
        .filter(|name| hints.is_match(name.as_str()))
        .map(|name| name.to_string())
        .collect::<Vec<_>>();

    if candidates.is_empty() {
        names.first().map(|name| vec![name.to_string()]).unwrap_or_default()
    } else {
        candidates
    }
}

/// Names of the integer and floating-point columns, in frame order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns().iter()
        .filter(|column| matches!(column.dtype(),
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 |
            DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 |
            DataType::Float32 | DataType::Float64))
        .map(|column| column.name().to_string())
        .collect()
}
