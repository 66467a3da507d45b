use std::fmt;

use anyhow::{Context, Result};
use serde::{de::{MapAccess, Visitor}, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

use crate::diagnostics::{Diagnostics, Warning};
use crate::resolve::Resolver;
use crate::taxonomy::{by_name, regions, BaseRegion};

use super::{Grouping, GroupingKind};

/// One named group of a custom grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomGroup {
    pub label: String,
    pub regions: Vec<String>,
}

/// Caller-defined groups of counties, in definition order.
///
/// Values are updated by returning a new grouping; the caller owns storage. Groups are
/// expected to be disjoint but nothing here enforces it. A group with no regions is kept
/// but never produces an aggregate row or geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomGrouping {
    groups: Vec<CustomGroup>,
}

/// How well a custom grouping covers the counties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    pub unassigned: Vec<&'static BaseRegion>,  // Counties in no group
    pub overlapping: Vec<&'static BaseRegion>, // Counties in more than one group
    pub empty_groups: Vec<String>,
    pub diagnostics: Diagnostics,              // Unknown region names
}

impl Coverage {
    /// True if every county is in exactly one group and every name is a county.
    pub fn is_complete_partition(&self) -> bool {
        self.unassigned.is_empty() && self.overlapping.is_empty() && self.diagnostics.is_empty()
    }
}

impl CustomGrouping {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn len(&self) -> usize { self.groups.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    #[inline] pub fn groups(&self) -> &[CustomGroup] { &self.groups }

    pub fn get(&self, label: &str) -> Option<&CustomGroup> {
        self.groups.iter().find(|group| group.label == label)
    }

    /// Add a group, or replace the regions of an existing group with the same label
    /// (keeping its position). Names that resolve to a county are stored canonically;
    /// others are kept verbatim and reported by `coverage`.
    pub fn define_group<S: AsRef<str>>(mut self, label: impl Into<String>, region_names: &[S]) -> Self {
        let label = label.into();
        let resolver = Resolver::default();
        let regions = region_names.iter()
            .map(|name| match resolver.resolve(name.as_ref()).region() {
                Some(region) => region.name.to_string(),
                None => name.as_ref().to_string(),
            })
            .collect::<Vec<_>>();

        match self.groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.regions = regions,
            None => self.groups.push(CustomGroup { label, regions }),
        }
        self
    }

    /// Drop a group by label. Unknown labels leave the grouping unchanged.
    pub fn remove_group(mut self, label: &str) -> Self {
        self.groups.retain(|group| group.label != label);
        self
    }

    /// Counties not used by any group, sorted by name.
    pub fn available_regions(&self) -> Vec<&'static BaseRegion> {
        self.unused_by(|_| true)
    }

    /// Counties a group may be edited to contain: everything not used by the *other* groups.
    pub fn available_for_group(&self, label: &str) -> Vec<&'static BaseRegion> {
        self.unused_by(|group| group.label != label)
    }

    fn unused_by(&self, counts: impl Fn(&CustomGroup) -> bool) -> Vec<&'static BaseRegion> {
        let mut available = regions().iter()
            .filter(|region| !self.groups.iter()
                .filter(|group| counts(group))
                .any(|group| group.regions.iter().any(|name| name == region.name)))
            .collect::<Vec<_>>();
        available.sort_by_key(|region| region.name);
        available
    }

    /// Report unassigned, doubly assigned and unknown regions.
    pub fn coverage(&self) -> Coverage {
        let mut coverage = Coverage::default();
        for group in &self.groups {
            if group.regions.is_empty() { coverage.empty_groups.push(group.label.clone()) }
            for name in &group.regions {
                if by_name(name).is_none() {
                    coverage.diagnostics.push(Warning::UnknownGroupRegion {
                        group: group.label.clone(),
                        region: name.clone(),
                    });
                }
            }
        }
        for region in regions() {
            match self.labels_of(region).len() {
                0 => coverage.unassigned.push(region),
                1 => {}
                _ => coverage.overlapping.push(region),
            }
        }
        coverage
    }

    /// Read a grouping from a JSON object of `label: [county, ...]`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("[grouping] Failed to parse custom grouping JSON")
    }
}

impl Grouping for CustomGrouping {
    fn kind(&self) -> GroupingKind { GroupingKind::Custom }

    fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|group| group.label.as_str()).collect()
    }

    fn members(&self, label: &str) -> Vec<&str> {
        self.get(label)
            .map(|group| group.regions.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn labels_of(&self, region: &BaseRegion) -> Vec<&str> {
        self.groups.iter()
            .filter(|group| group.regions.iter().any(|name| name == region.name))
            .map(|group| group.label.as_str())
            .collect()
    }
}

impl Serialize for CustomGrouping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.label, &group.regions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CustomGrouping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = CustomGrouping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of group label to a list of county names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut grouping = CustomGrouping::new();
                while let Some((label, names)) = map.next_entry::<String, Vec<String>>()? {
                    grouping = grouping.define_group(label, &names[..]);
                }
                Ok(grouping)
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}
