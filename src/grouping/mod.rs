mod custom;
mod random;

use sha2::{Digest, Sha256};

use crate::taxonomy::{by_name, regions, BaseRegion, Partition, PartitionKind};

pub use custom::{Coverage, CustomGroup, CustomGrouping};
pub use random::{random_groups, random_groups_with, RANDOM_GROUP_NAMES};

/// What a grouping is built from; decides export columns and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupingKind {
    County,
    Partition(PartitionKind),
    Custom,
}

impl GroupingKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            GroupingKind::County => "county",
            GroupingKind::Partition(kind) => kind.to_str(),
            GroupingKind::Custom => "custom",
        }
    }
}

/// A set of labelled groups of counties. Implemented by the fixed partitions, by the
/// county level itself, and by caller-defined custom groupings.
pub trait Grouping {
    fn kind(&self) -> GroupingKind;

    /// Group labels in declaration order.
    fn labels(&self) -> Vec<&str>;

    /// Configured county names of a group (empty for an unknown label).
    fn members(&self, label: &str) -> Vec<&str>;

    /// Labels of every group containing `region`. Exactly one for the fixed partitions,
    /// possibly none or several for custom groupings.
    fn labels_of(&self, region: &BaseRegion) -> Vec<&str>;

    /// Official identifier of a group, if it has one.
    fn id_of(&self, _label: &str) -> Option<&str> { None }

    /// Stable content hash of the grouping, used as a cache key.
    fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.kind().to_str().as_bytes());
        for label in self.labels() {
            hasher.update([0x1d_u8]);
            hasher.update(label.as_bytes());
            for member in self.members(label) {
                hasher.update([0x1e_u8]);
                hasher.update(member.as_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}

impl Grouping for Partition {
    fn kind(&self) -> GroupingKind { GroupingKind::Partition(Partition::kind(self)) }

    fn labels(&self) -> Vec<&str> { Partition::labels(self) }

    fn members(&self, label: &str) -> Vec<&str> {
        Partition::members(self, label).into_iter().map(|region| region.name).collect()
    }

    fn labels_of(&self, region: &BaseRegion) -> Vec<&str> {
        self.group_of(region.name).into_iter().collect()
    }

    fn id_of(&self, label: &str) -> Option<&str> { Partition::id_of(self, label) }
}

/// The county level: every county is its own group, labelled by its name.
#[derive(Debug, Clone, Copy, Default)]
pub struct Counties;

impl Grouping for Counties {
    fn kind(&self) -> GroupingKind { GroupingKind::County }

    fn labels(&self) -> Vec<&str> { regions().iter().map(|region| region.name).collect() }

    fn members(&self, label: &str) -> Vec<&str> {
        by_name(label).map(|region| vec![region.name]).unwrap_or_default()
    }

    fn labels_of(&self, region: &BaseRegion) -> Vec<&str> { vec![region.name] }

    fn id_of(&self, label: &str) -> Option<&str> { by_name(label).map(|region| region.code) }
}
