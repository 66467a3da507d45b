//! Mapping of user-supplied region identifiers onto the canonical counties.
//!
//! Identifiers arrive as codes ("01", or "1" after a numeric round trip), as names
//! ("Stockholm"), or as names in another case ("STOCKHOLM"). Matching is an ordered
//! list of pure strategies; the first one that matches wins.

mod strategy;

use std::borrow::Cow;

use regex::Regex;
use std::sync::OnceLock;

use crate::taxonomy::BaseRegion;

pub use strategy::{case_insensitive_name, exact_code, exact_name, MatchStrategy};

/// Outcome of resolving one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(&'static BaseRegion),
    Unresolved(String), // Original identifier, verbatim
}

impl Resolution {
    #[inline] pub fn region(&self) -> Option<&'static BaseRegion> {
        match self {
            Resolution::Resolved(region) => Some(region),
            Resolution::Unresolved(_) => None,
        }
    }

    #[inline] pub fn is_resolved(&self) -> bool { self.region().is_some() }
}

/// Ordered chain of match strategies.
#[derive(Clone)]
pub struct Resolver {
    strategies: Vec<(&'static str, MatchStrategy)>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            strategies: vec![
                ("exact-code", exact_code as MatchStrategy),
                ("exact-name", exact_name as MatchStrategy),
                ("case-insensitive-name", case_insensitive_name as MatchStrategy),
            ],
        }
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.strategies.iter().map(|(name, _)| name)).finish()
    }
}

impl Resolver {
    /// A resolver with no strategies; every identifier is unresolved until some are added.
    pub fn empty() -> Self {
        Self { strategies: Vec::new() }
    }

    /// Append a strategy at the lowest precedence.
    pub fn with_strategy(mut self, name: &'static str, strategy: MatchStrategy) -> Self {
        self.strategies.push((name, strategy));
        self
    }

    /// Names of the strategies, highest precedence first.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|(name, _)| *name).collect()
    }

    /// Resolve one identifier. Never fails: unmatched input is returned as `Unresolved`.
    pub fn resolve(&self, identifier: &str) -> Resolution {
        let normalized = normalize(identifier);
        self.strategies.iter()
            .find_map(|(_, strategy)| strategy(&normalized))
            .map(Resolution::Resolved)
            .unwrap_or_else(|| Resolution::Unresolved(identifier.to_string()))
    }

    /// Resolve a county name as written in a geometry feed ("Skåne län").
    pub fn resolve_feature_name(&self, name: &str) -> Resolution {
        match self.resolve(strip_county_suffix(name)) {
            Resolution::Unresolved(_) => Resolution::Unresolved(name.to_string()),
            resolved => resolved,
        }
    }
}

/// Resolve with the default strategy chain.
pub fn resolve(identifier: &str) -> Resolution {
    Resolver::default().resolve(identifier)
}

/// Trim surrounding whitespace and left-pad a lone digit with "0".
pub fn normalize(identifier: &str) -> Cow<'_, str> {
    let trimmed = identifier.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Cow::Owned(format!("0{c}")),
        _ => Cow::Borrowed(trimmed),
    }
}

/// Remove a trailing " län" (any case) from a county name.
pub fn strip_county_suffix(name: &str) -> &str {
    static SUFFIX: OnceLock<Regex> = OnceLock::new();
    let suffix = SUFFIX.get_or_init(|| Regex::new(r"(?i)\s+län\s*$").unwrap());
    match suffix.find(name) {
        Some(found) => &name[..found.start()],
        None => name,
    }
}
