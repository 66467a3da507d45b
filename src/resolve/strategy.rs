use crate::taxonomy::{by_code, by_name, regions, BaseRegion};

/// A single matching rule from a normalized identifier to a county.
pub type MatchStrategy = fn(&str) -> Option<&'static BaseRegion>;

/// Exact match against county codes.
pub fn exact_code(identifier: &str) -> Option<&'static BaseRegion> {
    by_code(identifier)
}

/// Exact match against county names.
pub fn exact_name(identifier: &str) -> Option<&'static BaseRegion> {
    by_name(identifier)
}

/// Match against lower-cased county names.
pub fn case_insensitive_name(identifier: &str) -> Option<&'static BaseRegion> {
    let lowered = identifier.to_lowercase();
    regions().iter().find(|region| region.name.to_lowercase() == lowered)
}
