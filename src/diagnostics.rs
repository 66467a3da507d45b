//! Non-fatal conditions reported beside results.
//!
//! Messy input (typos, blank cells, counties missing from a geometry feed) is expected
//! and never aborts an operation; each occurrence becomes a `Warning`.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// An identifier matched no county. `row` is the zero-based input row.
    UnresolvedRegion { row: usize, identifier: String },
    /// A value could not be converted to a number.
    NonNumericValue { row: usize, column: String, raw: String },
    /// A group has no source geometry and is absent from the merged output.
    GeometryMismatch { group: String },
    /// A geometry feed lacked its name property and a fixed fallback table was used.
    MalformedGeometrySource { feature: usize, detail: String },
    /// A custom group names something that is not a county.
    UnknownGroupRegion { group: String, region: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnresolvedRegion { row, identifier } =>
                write!(f, "row {row}: region '{identifier}' does not match any county"),
            Warning::NonNumericValue { row, column, raw } =>
                write!(f, "row {row}: value '{raw}' in column '{column}' is not a number"),
            Warning::GeometryMismatch { group } =>
                write!(f, "no geometry found for group '{group}'"),
            Warning::MalformedGeometrySource { feature, detail } =>
                write!(f, "feature {feature}: {detail}"),
            Warning::UnknownGroupRegion { group, region } =>
                write!(f, "group '{group}' contains unknown region '{region}'"),
        }
    }
}

/// Ordered collection of warnings produced by one operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn push(&mut self, warning: Warning) { self.warnings.push(warning) }

    #[inline] pub fn extend(&mut self, other: Diagnostics) { self.warnings.extend(other.warnings) }

    #[inline] pub fn is_empty(&self) -> bool { self.warnings.is_empty() }

    #[inline] pub fn len(&self) -> usize { self.warnings.len() }

    #[inline] pub fn iter(&self) -> impl Iterator<Item = &Warning> + '_ { self.warnings.iter() }

    /// Identifiers that failed to resolve, in row order (duplicates kept).
    pub fn unresolved_identifiers(&self) -> Vec<&str> {
        self.warnings.iter()
            .filter_map(|warning| match warning {
                Warning::UnresolvedRegion { identifier, .. } => Some(identifier.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Groups that were dropped from a merge for lack of geometry.
    pub fn missing_geometries(&self) -> Vec<&str> {
        self.warnings.iter()
            .filter_map(|warning| match warning {
                Warning::GeometryMismatch { group } => Some(group.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of values that could not be parsed as numbers.
    pub fn non_numeric_count(&self) -> usize {
        self.warnings.iter()
            .filter(|warning| matches!(warning, Warning::NonNumericValue { .. }))
            .count()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Warning;
    type IntoIter = std::vec::IntoIter<Warning>;

    fn into_iter(self) -> Self::IntoIter { self.warnings.into_iter() }
}
