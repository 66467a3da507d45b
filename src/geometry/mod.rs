//! Boundary geometry: reading polygon feeds, merging counties into larger regions,
//! and bringing feeds into a common reference system.

mod cache;
mod compare;
mod geojson;
mod merge;
mod proj;
mod union;

use std::sync::OnceLock;

use geo::{BoundingRect, Coord, MultiPolygon, Rect};
use sha2::{Digest, Sha256};

pub use cache::MergeCache;
pub use compare::{compare_boundaries, BoundaryComparison, BoundaryMatch};
pub use geojson::{read_county_geojson, read_nuts_geojson};
pub use merge::{merge, merge_with, MergeOutcome};
pub use union::{CascadedUnion, PolygonUnion};

/// A polygon boundary tagged with the name used by its source feed.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
    pub name: String,
    pub shape: MultiPolygon<f64>,
}

/// A geometry feed: one boundary per county in a single reference system.
#[derive(Debug, Clone)]
pub struct RegionGeometries {
    regions: Vec<RegionGeometry>,
    epsg: u32,
    fingerprint: OnceLock<String>, // Computed on first use
}

impl RegionGeometries {
    pub fn new(regions: Vec<RegionGeometry>, epsg: u32) -> Self {
        Self { regions, epsg, fingerprint: OnceLock::new() }
    }

    #[inline] pub fn regions(&self) -> &[RegionGeometry] { &self.regions }

    #[inline] pub fn epsg(&self) -> u32 { self.epsg }

    #[inline] pub fn len(&self) -> usize { self.regions.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.regions.is_empty() }

    /// SHA-256 over the reference system, names and coordinates. Identifies the feed in
    /// a `MergeCache`; any change to the content changes the fingerprint.
    pub fn fingerprint(&self) -> &str {
        self.fingerprint.get_or_init(|| {
            let mut hasher = Sha256::new();
            hasher.update(self.epsg.to_le_bytes());
            for region in &self.regions {
                hasher.update([0x1d_u8]);
                hasher.update(region.name.as_bytes());
                hash_shape(&mut hasher, &region.shape);
            }
            hex::encode(hasher.finalize())
        })
    }

    /// Bounding rectangle of all boundaries.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        union_bounds(self.regions.iter().map(|region| &region.shape))
    }
}

impl PartialEq for RegionGeometries {
    fn eq(&self, other: &Self) -> bool {
        self.epsg == other.epsg && self.regions == other.regions
    }
}

/// The union of all boundaries assigned to one group.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedGeometry {
    pub group_label: String,
    pub group_id: Option<String>,
    pub shape: MultiPolygon<f64>,
}

/// One boundary per group of a partition or grouping, in one reference system.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundaries {
    groups: Vec<MergedGeometry>,
    epsg: u32,
}

impl Boundaries {
    pub fn new(groups: Vec<MergedGeometry>, epsg: u32) -> Self {
        Self { groups, epsg }
    }

    #[inline] pub fn groups(&self) -> &[MergedGeometry] { &self.groups }

    #[inline] pub fn epsg(&self) -> u32 { self.epsg }

    #[inline] pub fn len(&self) -> usize { self.groups.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    pub fn get(&self, label: &str) -> Option<&MergedGeometry> {
        self.groups.iter().find(|group| group.group_label == label)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&MergedGeometry> {
        self.groups.iter().find(|group| group.group_id.as_deref() == Some(id))
    }

    /// Bounding rectangle of all boundaries.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        union_bounds(self.groups.iter().map(|group| &group.shape))
    }
}

fn hash_shape(hasher: &mut Sha256, shape: &MultiPolygon<f64>) {
    for polygon in &shape.0 {
        hasher.update([0x1e_u8]);
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            hasher.update([0x1f_u8]);
            for coord in ring.coords() {
                hasher.update(coord.x.to_le_bytes());
                hasher.update(coord.y.to_le_bytes());
            }
        }
    }
}

fn union_bounds<'a>(shapes: impl Iterator<Item = &'a MultiPolygon<f64>>) -> Option<Rect<f64>> {
    shapes
        .filter_map(|shape| shape.bounding_rect())
        .reduce(|a, b| Rect::new(
            Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
            Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
        ))
}
