// End-to-end: county GeoJSON -> merged region boundaries -> GeoJSON output.

use geo::Area;
use lanskarta::{
    geometry::{compare_boundaries, read_county_geojson, read_nuts_geojson, MergeCache},
    merge,
    taxonomy::regions,
    CustomGrouping, Warning, NUTS2, TRANSPORT,
};
use serde_json::{json, Value};

fn square(x: f64, y: f64) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]],
    })
}

/// Every county as a unit square on a 7x3 grid, named like the public county feed.
fn county_feed() -> Vec<u8> {
    let features: Vec<Value> = regions().iter().enumerate()
        .map(|(i, region)| json!({
            "type": "Feature",
            "properties": { "name": format!("{} län", region.name) },
            "geometry": square((i % 7) as f64, (i / 7) as f64),
        }))
        .collect();
    serde_json::to_vec(&json!({ "type": "FeatureCollection", "features": features })).unwrap()
}

#[test]
fn transport_regions_cover_their_counties() {
    let (source, diagnostics) = read_county_geojson(&county_feed()).unwrap();
    assert!(diagnostics.is_empty());

    let outcome = merge(&source, &TRANSPORT);
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.boundaries.len(), 6);
    for label in TRANSPORT.labels() {
        let merged = outcome.boundaries.get(label).unwrap();
        let expected = TRANSPORT.members(label).len() as f64;
        assert!((merged.shape.unsigned_area() - expected).abs() < 1e-9, "{label}");
    }

    let geojson = outcome.boundaries.to_geojson();
    assert_eq!(geojson["features"].as_array().unwrap().len(), 6);
    assert_eq!(geojson["features"][0]["properties"]["name"], "Syd");
    assert_eq!(geojson["features"][0]["properties"]["id"], "26");
    assert_eq!(geojson["crs"]["properties"]["name"], "urn:ogc:def:crs:EPSG::4326");
}

#[test]
fn custom_groups_without_geometry_are_reported() {
    let (source, _) = read_county_geojson(&county_feed()).unwrap();
    let grouping = CustomGrouping::new()
        .define_group("Norra", &["Norrbotten", "Västerbotten"])
        .define_group("Ingenstans", &["Atlantis"]);

    let outcome = merge(&source, &grouping);
    assert_eq!(outcome.boundaries.len(), 1);
    assert!((outcome.boundaries.get("Norra").unwrap().shape.unsigned_area() - 2.0).abs() < 1e-9);
    assert_eq!(outcome.diagnostics.missing_geometries(), vec!["Ingenstans"]);
}

#[test]
fn cache_reuses_merges_until_the_grouping_changes() {
    let (source, _) = read_county_geojson(&county_feed()).unwrap();
    let mut cache = MergeCache::new();

    let first = cache.merge(&source, &NUTS2).clone();
    let second = cache.merge(&source, &NUTS2).clone();
    assert_eq!(first, second);
    assert_eq!((cache.hits(), cache.misses()), (1, 1));

    let grouping = CustomGrouping::new().define_group("Syd", &["Skåne"]);
    cache.merge(&source, &grouping);
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn merged_counties_match_a_nuts_feed() {
    let (source, _) = read_county_geojson(&county_feed()).unwrap();
    let synthesized = merge(&source, &NUTS2).boundaries;

    // An authoritative feed built from the same squares, plus one foreign region.
    let mut features: Vec<Value> = synthesized.to_geojson()["features"].as_array().unwrap().iter()
        .map(|feature| json!({
            "type": "Feature",
            "properties": { "NUTS_ID": feature["properties"]["id"], "NUTS_NAME": "x" },
            "geometry": feature["geometry"],
        }))
        .collect();
    features.push(json!({ "type": "Feature", "properties": { "NUTS_ID": "NO08" }, "geometry": square(50.0, 50.0) }));
    let bytes = serde_json::to_vec(&json!({
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:OGC:1.3:CRS84" } },
        "features": features,
    })).unwrap();

    let (authoritative, diagnostics) = read_nuts_geojson(&bytes).unwrap();
    assert!(diagnostics.iter().all(|warning| matches!(warning, Warning::MalformedGeometrySource { .. })));
    assert_eq!(authoritative.len(), 8);
    assert_eq!(authoritative.epsg(), 4326);

    let comparison = compare_boundaries(&authoritative, &synthesized).unwrap();
    assert_eq!(comparison.matches.len(), 8);
    assert!(comparison.matches.iter().all(|matched| (matched.iou - 1.0).abs() < 1e-9));
    assert!(comparison.only_left.is_empty() && comparison.only_right.is_empty());
}

#[test]
fn name_only_nuts_feed_matches_merged_counties() {
    let (source, _) = read_county_geojson(&county_feed()).unwrap();
    let synthesized = merge(&source, &NUTS2).boundaries;

    let features: Vec<Value> = synthesized.to_geojson()["features"].as_array().unwrap().iter()
        .map(|feature| {
            let label = feature["properties"]["name"].as_str().unwrap();
            let name = label.split_once(' ').map_or(label, |(_, name)| name);
            json!({ "type": "Feature", "properties": { "NUTS_NAME": name }, "geometry": feature["geometry"] })
        })
        .collect();
    let bytes = serde_json::to_vec(&json!({
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::4326" } },
        "features": features,
    })).unwrap();

    let (authoritative, diagnostics) = read_nuts_geojson(&bytes).unwrap();
    assert_eq!(diagnostics.len(), 8);

    let comparison = compare_boundaries(&authoritative, &synthesized).unwrap();
    assert_eq!(comparison.matches.len(), 8);
    assert!(comparison.matches.iter().all(|matched| (matched.iou - 1.0).abs() < 1e-9));
}
