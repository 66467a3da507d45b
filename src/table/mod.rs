//! Input rows: reading user tables and turning their rows into resolved records.

mod columns;
mod csv;
mod records;
mod sample;

pub use columns::{numeric_columns, region_column_candidates};
pub use csv::{read_csv, read_csv_bytes, write_csv, write_csv_string};
pub use records::{records_from_frame, resolve_records, RawRecord, RawValue, ResolvedRecord};
pub use sample::{sample_codes, sample_names};
