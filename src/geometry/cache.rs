use std::collections::hash_map::Entry;

use ahash::AHashMap;

use crate::grouping::Grouping;

use super::{merge, MergeOutcome, RegionGeometries};

/// Memoized merges keyed by (feed fingerprint, grouping fingerprint).
///
/// Owned by the caller, one per session; the library never shares it. A cached outcome
/// is identical to a fresh `merge` of the same inputs.
#[derive(Debug, Default)]
pub struct MergeCache {
    entries: AHashMap<(String, String), MergeOutcome>,
    hits: usize,
    misses: usize,
}

impl MergeCache {
    pub fn new() -> Self { Self::default() }

    /// Merge `source` by `grouping`, reusing a previous result for identical inputs.
    pub fn merge<G: Grouping + ?Sized>(&mut self, source: &RegionGeometries, grouping: &G) -> &MergeOutcome {
        let key = (source.fingerprint().to_string(), grouping.fingerprint());
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                entry.insert(merge(source, grouping))
            }
        }
    }

    /// Drop every cached outcome.
    pub fn clear(&mut self) { self.entries.clear() }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[inline] pub fn hits(&self) -> usize { self.hits }

    #[inline] pub fn misses(&self) -> usize { self.misses }
}
