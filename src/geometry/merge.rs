use ahash::AHashMap;
use geo::MultiPolygon;

use crate::diagnostics::{Diagnostics, Warning};
use crate::grouping::Grouping;
use crate::resolve::Resolver;
use crate::taxonomy::by_name;

use super::{Boundaries, CascadedUnion, MergedGeometry, PolygonUnion, RegionGeometries};

/// Merged boundaries plus the groups and features that could not be matched.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub boundaries: Boundaries,
    pub diagnostics: Diagnostics,
}

/// Union county boundaries into one boundary per group using `CascadedUnion`.
pub fn merge<G: Grouping + ?Sized>(source: &RegionGeometries, grouping: &G) -> MergeOutcome {
    merge_with(source, grouping, &CascadedUnion)
}

/// Union county boundaries into one boundary per group.
///
/// Feature names are matched to counties after dropping a " län" suffix. Member shapes
/// are unioned in county-code order, so the order of the source features never changes
/// the result. Groups without any matching feature are left out and reported.
pub fn merge_with<G, U>(source: &RegionGeometries, grouping: &G, union: &U) -> MergeOutcome
where
    G: Grouping + ?Sized,
    U: PolygonUnion + ?Sized,
{
    let mut diagnostics = Diagnostics::new();
    let resolver = Resolver::default();

    // County code -> shapes from the feed (a county may be split over several features).
    let mut shapes_by_code: AHashMap<&'static str, Vec<&MultiPolygon<f64>>> = AHashMap::new();
    for (row, region) in source.regions().iter().enumerate() {
        match resolver.resolve_feature_name(&region.name).region() {
            Some(county) => shapes_by_code.entry(county.code).or_default().push(&region.shape),
            None => diagnostics.push(Warning::UnresolvedRegion { row, identifier: region.name.clone() }),
        }
    }

    let mut groups = Vec::new();
    for label in grouping.labels() {
        let mut codes = grouping.members(label).into_iter()
            .filter_map(by_name)
            .map(|county| county.code)
            .collect::<Vec<_>>();
        codes.sort_unstable();
        codes.dedup();

        let shapes = codes.iter()
            .filter_map(|code| shapes_by_code.get(code))
            .flatten()
            .copied()
            .collect::<Vec<_>>();

        if shapes.is_empty() {
            diagnostics.push(Warning::GeometryMismatch { group: label.to_string() });
            continue;
        }

        groups.push(MergedGeometry {
            group_label: label.to_string(),
            group_id: grouping.id_of(label).map(str::to_string),
            shape: union.union_all(&shapes),
        });
    }

    MergeOutcome { boundaries: Boundaries::new(groups, source.epsg()), diagnostics }
}

#[cfg(test)]
mod tests {
    use geo::{Area, BooleanOps};
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    use super::*;
    use crate::geometry::fixtures::{county_grid, square};
    use crate::geometry::RegionGeometry;
    use crate::grouping::{Counties, CustomGrouping};
    use crate::taxonomy::{Partition, NUTS2, TRANSPORT};

    #[test]
    fn builtin_partitions_cover_every_group() {
        let source = county_grid();
        for (partition, groups) in [(&NUTS2, 8), (&TRANSPORT, 6)] {
            let outcome = merge(&source, partition);
            assert!(outcome.diagnostics.is_empty(), "{:?}", outcome.diagnostics);
            assert_eq!(outcome.boundaries.len(), groups);
            assert_eq!(outcome.boundaries.epsg(), 4326);

            let total = outcome.boundaries.groups().iter().map(|g| g.shape.unsigned_area()).sum::<f64>();
            assert!((total - 21.0).abs() < 1e-9);

            for group in outcome.boundaries.groups() {
                let members = Partition::members(partition, &group.group_label).len() as f64;
                assert!((group.shape.unsigned_area() - members).abs() < 1e-9, "{}", group.group_label);
            }
        }
    }

    #[test]
    fn ids_are_carried_over() {
        let outcome = merge(&county_grid(), &TRANSPORT);
        assert_eq!(outcome.boundaries.get("Mitt").unwrap().group_id.as_deref(), Some("28"));
        assert_eq!(outcome.boundaries.get_by_id("29").unwrap().group_label, "Öst");
    }

    #[test]
    fn shuffled_input_covers_the_same_area() {
        let source = county_grid();
        let mut regions = source.regions().to_vec();
        regions.shuffle(&mut StdRng::seed_from_u64(3));
        let shuffled = RegionGeometries::new(regions, source.epsg());

        let a = merge(&source, &NUTS2).boundaries;
        let b = merge(&shuffled, &NUTS2).boundaries;
        assert_eq!(a.len(), b.len());
        for group in a.groups() {
            let other = b.get(&group.group_label).unwrap();
            let difference = group.shape.xor(&other.shape).unsigned_area();
            assert!(difference < 1e-9, "{}", group.group_label);
        }
    }

    #[test]
    fn missing_geometry_is_reported_not_emitted() {
        let source = county_grid();
        let regions = source.regions().iter()
            .filter(|r| !r.name.starts_with("Stockholm"))
            .cloned()
            .collect();
        let outcome = merge(&RegionGeometries::new(regions, 4326), &NUTS2);

        assert_eq!(outcome.boundaries.len(), 7);
        assert!(outcome.boundaries.get("SE11 Stockholm").is_none());
        assert_eq!(outcome.diagnostics.missing_geometries(), ["SE11 Stockholm"]);
    }

    #[test]
    fn unknown_features_are_reported() {
        let mut regions = county_grid().regions().to_vec();
        regions.push(RegionGeometry { name: "Åland".into(), shape: square(20.0, 0.0) });
        let outcome = merge(&RegionGeometries::new(regions, 4326), &Counties);
        assert_eq!(outcome.boundaries.len(), 21);
        assert_eq!(outcome.diagnostics.unresolved_identifiers(), ["Åland"]);
    }

    #[test]
    fn custom_groups_merge_and_skip_empty() {
        let grouping = CustomGrouping::new()
            .define_group("Par", &["Stockholm", "Uppsala"])
            .define_group("Tom", &[] as &[&str]);
        let outcome = merge(&county_grid(), &grouping);
        assert_eq!(outcome.boundaries.len(), 1);
        let par = outcome.boundaries.get("Par").unwrap();
        assert_eq!(par.shape.0.len(), 1); // neighbours on the grid fuse
        assert_eq!(outcome.diagnostics.missing_geometries(), ["Tom"]);
    }

    #[test]
    fn counties_level_normalizes_names() {
        let outcome = merge(&county_grid(), &Counties);
        assert_eq!(outcome.boundaries.get("Skåne").unwrap().group_id.as_deref(), Some("12"));
    }
}
