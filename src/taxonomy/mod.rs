mod partition;
mod region;

pub use partition::{Partition, PartitionKind, NUTS2, TRANSPORT, NUTS_ID_TO_NAME};
pub use region::{by_code, by_name, regions, BaseRegion};
