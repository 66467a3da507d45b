#![doc = "Lanskarta: Swedish county statistics aggregated to counties, NUTS-2 regions, transport regions and custom groupings, with merged boundaries for choropleth maps"]
pub mod aggregate;
pub mod config;
pub mod diagnostics;
pub mod geometry;
pub mod grouping;
pub mod resolve;
pub mod table;
pub mod taxonomy;

#[doc(inline)]
pub use aggregate::{aggregate, analyze, Aggregate, AggregateRow, Analysis, Summary};

#[doc(inline)]
pub use config::{AnalysisConfig, Level};

#[doc(inline)]
pub use diagnostics::{Diagnostics, Warning};

#[doc(inline)]
pub use geometry::{merge, Boundaries, MergeCache, RegionGeometries};

#[doc(inline)]
pub use grouping::{random_groups, Counties, CustomGrouping, Grouping};

#[doc(inline)]
pub use resolve::{resolve, Resolution, Resolver};

#[doc(inline)]
pub use taxonomy::{BaseRegion, PartitionKind, NUTS2, TRANSPORT};
