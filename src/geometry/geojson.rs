use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{json, Map, Value};

use super::{Boundaries, CascadedUnion, MergedGeometry, PolygonUnion, RegionGeometries, RegionGeometry};
use crate::{
    config::{COUNTY_EPSG, NUTS2_EPSG},
    diagnostics::{Diagnostics, Warning},
    taxonomy::{by_code, NUTS2, NUTS_ID_TO_NAME},
};

/// Properties that may carry a county code when `name` is absent.
const COUNTY_CODE_PROPERTIES: [&str; 3] = ["lan_kod", "code", "ref"];

/// Read a county feed: one feature per county, identified by its `name` property.
/// Features without a name fall back to a county-code property; the load fails only
/// when no feature can be identified at all.
pub fn read_county_geojson(bytes: &[u8]) -> Result<(RegionGeometries, Diagnostics)> {
    let value: Value = serde_json::from_slice(bytes)
        .context("[geometry::geojson] Failed to parse county GeoJSON")?;
    let epsg = declared_epsg(&value)?.unwrap_or(COUNTY_EPSG);

    let mut diagnostics = Diagnostics::new();
    let mut regions = Vec::new();
    let features = features(&value)?;
    let mut identifiable = false;

    for (index, feature) in features.iter().enumerate() {
        let properties = &feature["properties"];
        let name = match properties["name"].as_str() {
            Some(name) => name.to_string(),
            None => {
                let Some(region) = COUNTY_CODE_PROPERTIES.iter()
                    .filter_map(|key| property_text(&properties[*key]))
                    .find_map(|code| by_code(&crate::resolve::normalize(&code)))
                else {
                    diagnostics.push(Warning::MalformedGeometrySource {
                        feature: index,
                        detail: "no 'name' or county code property; feature skipped".into(),
                    });
                    continue
                };
                diagnostics.push(Warning::MalformedGeometrySource {
                    feature: index,
                    detail: format!("no 'name' property; identified by county code {}", region.code),
                });
                region.name.to_string()
            }
        };
        identifiable = true;

        match parse_geometry(&feature["geometry"]) {
            Ok(shape) => regions.push(RegionGeometry { name, shape }),
            Err(error) => diagnostics.push(Warning::MalformedGeometrySource {
                feature: index,
                detail: format!("{error:#}"),
            }),
        }
    }

    if !identifiable && !features.is_empty() {
        bail!("[geometry::geojson] No feature carries a 'name' or county code property");
    }

    Ok((RegionGeometries::new(regions, epsg), diagnostics))
}

/// Read a GISCO NUTS level-2 feed, keeping Swedish regions (`NUTS_ID` starting with
/// "SE"). Labels follow the NUTS-2 partition ("SE11 Stockholm"); features without a
/// name property fall back to the fixed NUTS_ID table.
pub fn read_nuts_geojson(bytes: &[u8]) -> Result<(Boundaries, Diagnostics)> {
    let value: Value = serde_json::from_slice(bytes)
        .context("[geometry::geojson] Failed to parse NUTS GeoJSON")?;
    let epsg = declared_epsg(&value)?.unwrap_or(NUTS2_EPSG);

    let mut diagnostics = Diagnostics::new();
    let mut groups: Vec<(String, Option<String>, Vec<MultiPolygon<f64>>)> = Vec::new();
    let mut considered = 0;
    let mut identifiable = false;

    for (index, feature) in features(&value)?.iter().enumerate() {
        let properties = &feature["properties"];
        let nuts_id = properties["NUTS_ID"].as_str();
        if nuts_id.is_some_and(|id| !id.starts_with("SE")) { continue }
        considered += 1;

        let name = properties["NUTS_NAME"].as_str()
            .or_else(|| properties["NAME"].as_str())
            .map(str::to_string);
        if nuts_id.is_some() || name.is_some() { identifiable = true }

        let Some((label, group_id)) = nuts_label(nuts_id, name.as_deref(), index, &mut diagnostics) else { continue };

        let shape = match parse_geometry(&feature["geometry"]) {
            Ok(shape) => shape,
            Err(error) => {
                diagnostics.push(Warning::MalformedGeometrySource { feature: index, detail: format!("{error:#}") });
                continue
            }
        };

        match groups.iter_mut().find(|(existing, ..)| *existing == label) {
            Some((_, _, shapes)) => shapes.push(shape),
            None => groups.push((label, group_id, vec![shape])),
        }
    }

    if !identifiable && considered > 0 {
        bail!("[geometry::geojson] No NUTS feature carries 'NUTS_ID', 'NUTS_NAME' or 'NAME'");
    }

    let union = CascadedUnion;
    let groups = groups.into_iter()
        .map(|(group_label, group_id, shapes)| MergedGeometry {
            shape: union.union_all(&shapes.iter().collect::<Vec<_>>()),
            group_label,
            group_id,
        })
        .collect();

    Ok((Boundaries::new(groups, epsg), diagnostics))
}

/// Label and NUTS_ID of a feature, or `None` (with a warning) if it cannot be labelled.
///
/// A feature without `NUTS_ID` is matched by name: the first region whose name is
/// contained in the feature name, ignoring case.
fn nuts_label(nuts_id: Option<&str>, name: Option<&str>, feature: usize, diagnostics: &mut Diagnostics) -> Option<(String, Option<String>)> {
    let name = match (name, nuts_id) {
        (Some(name), _) => Some(name.to_string()),
        (None, Some(id)) => {
            let name = NUTS_ID_TO_NAME.iter()
                .find(|(key, _)| *key == id)
                .map(|(_, name)| name.to_string());
            if name.is_some() {
                diagnostics.push(Warning::MalformedGeometrySource {
                    feature,
                    detail: format!("no 'NUTS_NAME' or 'NAME' property; name for {id} taken from fixed table"),
                });
            }
            name
        }
        (None, None) => None,
    };

    match (nuts_id, name) {
        (Some(id), name) if NUTS2.label_of_id(id).is_some() || name.is_some() => {
            let label = match NUTS2.label_of_id(id) {
                Some(label) => label.to_string(),
                None => format!("{id} {}", name.unwrap_or_default()),
            };
            Some((label, Some(id.to_string())))
        }
        (None, Some(name)) => {
            let lowered = name.to_lowercase();
            let matched = NUTS_ID_TO_NAME.iter()
                .find(|(_, region)| lowered.contains(&region.to_lowercase()))
                .and_then(|&(id, _)| NUTS2.label_of_id(id).map(|label| (label, id)));
            match matched {
                Some((label, id)) => {
                    diagnostics.push(Warning::MalformedGeometrySource {
                        feature,
                        detail: format!("no 'NUTS_ID' property; '{name}' matched to {id} by name"),
                    });
                    Some((label.to_string(), Some(id.to_string())))
                }
                None => {
                    diagnostics.push(Warning::MalformedGeometrySource {
                        feature,
                        detail: format!("no 'NUTS_ID' property and '{name}' matches no NUTS-2 region"),
                    });
                    Some((name, None))
                }
            }
        }
        (id, _) => {
            diagnostics.push(Warning::MalformedGeometrySource {
                feature,
                detail: format!("no usable name for NUTS_ID {}; feature dropped", id.unwrap_or("(none)")),
            });
            None
        }
    }
}

fn features(value: &Value) -> Result<&Vec<Value>> {
    value["features"].as_array()
        .ok_or_else(|| anyhow!("[geometry::geojson] Not a FeatureCollection: missing 'features' array"))
}

/// Text of a string or integer property.
fn property_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// EPSG code named by a legacy `crs` member, if any.
fn declared_epsg(value: &Value) -> Result<Option<u32>> {
    let Some(name) = value["crs"]["properties"]["name"].as_str() else { return Ok(None) };
    if name.ends_with("CRS84") { return Ok(Some(4326)) }

    let code = name.rsplit(':').next().unwrap_or(name);
    code.parse::<u32>()
        .map(Some)
        .with_context(|| format!("[geometry::geojson] Unrecognized CRS name: {name}"))
}

fn parse_geometry(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let coordinates = geometry["coordinates"].as_array()
        .ok_or_else(|| anyhow!("geometry has no coordinates"))?;

    match geometry["type"].as_str() {
        Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon(coordinates)?])),
        Some("MultiPolygon") => coordinates.iter()
            .map(|polygon| polygon.as_array()
                .ok_or_else(|| anyhow!("invalid MultiPolygon member"))
                .and_then(|rings| parse_polygon(rings)))
            .collect::<Result<Vec<_>>>()
            .map(MultiPolygon),
        Some(other) => bail!("unsupported geometry type '{other}'"),
        None => bail!("geometry has no type"),
    }
}

/// Exterior ring followed by any holes.
fn parse_polygon(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| anyhow!("invalid polygon ring"))
            .and_then(|coords| parse_ring(coords))
    });
    let exterior = rings.next().ok_or_else(|| anyhow!("polygon has no exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(coords: &[Value]) -> Result<LineString<f64>> {
    let points = coords.iter()
        .map(|pair| match pair.as_array().map(Vec::as_slice) {
            Some([x, y, ..]) => Ok(Coord {
                x: x.as_f64().ok_or_else(|| anyhow!("invalid coordinate: x must be a number"))?,
                y: y.as_f64().ok_or_else(|| anyhow!("invalid coordinate: y must be a number"))?,
            }),
            _ => bail!("invalid coordinate pair"),
        })
        .collect::<Result<Vec<_>>>()?;

    // Polygon::new closes open rings.
    Ok(LineString(points))
}

fn geometry_json(shape: &MultiPolygon<f64>) -> Value {
    let ring = |ring: &LineString<f64>| ring.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>();
    let polygons: Vec<Value> = shape.0.iter()
        .map(|polygon| {
            let rings: Vec<_> = std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(ring)
                .collect();
            json!(rings)
        })
        .collect();
    json!({ "type": "MultiPolygon", "coordinates": polygons })
}

fn feature_collection(features: Vec<Value>, epsg: u32) -> Value {
    json!({
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": format!("urn:ogc:def:crs:EPSG::{epsg}") } },
        "features": features,
    })
}

impl Boundaries {
    /// FeatureCollection with a `name` property per group, plus `id` where the group
    /// has an official identifier.
    pub fn to_geojson(&self) -> Value {
        let features = self.groups().iter()
            .map(|group| {
                let mut properties = Map::new();
                properties.insert("name".to_string(), json!(group.group_label));
                if let Some(id) = &group.group_id {
                    properties.insert("id".to_string(), json!(id));
                }
                json!({ "type": "Feature", "geometry": geometry_json(&group.shape), "properties": properties })
            })
            .collect();
        feature_collection(features, self.epsg())
    }
}

impl RegionGeometries {
    pub fn to_geojson(&self) -> Value {
        let features = self.regions().iter()
            .map(|region| json!({
                "type": "Feature",
                "geometry": geometry_json(&region.shape),
                "properties": { "name": region.name },
            }))
            .collect();
        feature_collection(features, self.epsg())
    }
}

#[cfg(test)]
mod tests {
    use geo::Area;

    use super::*;
    use crate::geometry::fixtures::{county_grid, square};

    fn feature(properties: Value, x: f64, y: f64) -> Value {
        json!({
            "type": "Feature",
            "properties": properties,
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]],
            },
        })
    }

    fn collection(features: Vec<Value>) -> Vec<u8> {
        serde_json::to_vec(&json!({ "type": "FeatureCollection", "features": features })).unwrap()
    }

    #[test]
    fn county_feed_round_trips_through_geojson() {
        let grid = county_grid();
        let bytes = serde_json::to_vec(&grid.to_geojson()).unwrap();
        let (read, diagnostics) = read_county_geojson(&bytes).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(read, grid);
    }

    #[test]
    fn county_code_fallback_warns() {
        let bytes = collection(vec![
            feature(json!({ "name": "Skåne län" }), 0.0, 0.0),
            feature(json!({ "lan_kod": 3 }), 1.0, 0.0),
            feature(json!({ "color": "red" }), 2.0, 0.0),
        ]);
        let (read, diagnostics) = read_county_geojson(&bytes).unwrap();
        let names: Vec<_> = read.regions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Skåne län", "Uppsala"]);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(read.epsg(), 4326);
    }

    #[test]
    fn county_feed_without_identifiers_fails() {
        let bytes = collection(vec![feature(json!({ "color": "red" }), 0.0, 0.0)]);
        assert!(read_county_geojson(&bytes).is_err());
        assert!(read_county_geojson(b"{\"type\": \"Feature\"}").is_err());
    }

    #[test]
    fn nuts_feed_filters_and_labels() {
        let mut bytes = serde_json::from_slice::<Value>(&collection(vec![
            feature(json!({ "NUTS_ID": "SE11", "NUTS_NAME": "Stockholm" }), 0.0, 0.0),
            feature(json!({ "NUTS_ID": "SE33" }), 1.0, 0.0),
            feature(json!({ "NUTS_ID": "FI1D", "NUTS_NAME": "Pohjois- ja Itä-Suomi" }), 2.0, 0.0),
            feature(json!({ "NUTS_ID": "SE99", "NAME": "Extra-Regio" }), 3.0, 0.0),
        ])).unwrap();
        bytes["crs"] = json!({ "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::3035" } });
        let bytes = serde_json::to_vec(&bytes).unwrap();

        let (boundaries, diagnostics) = read_nuts_geojson(&bytes).unwrap();
        let labels: Vec<_> = boundaries.groups().iter().map(|g| g.group_label.as_str()).collect();
        assert_eq!(labels, vec!["SE11 Stockholm", "SE33 Övre Norrland", "SE99 Extra-Regio"]);
        assert_eq!(boundaries.get_by_id("SE11").unwrap().group_label, "SE11 Stockholm");
        assert_eq!(boundaries.epsg(), 3035);
        // SE33 carries no name property
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn nuts_name_fallback_table_warns() {
        let bytes = collection(vec![feature(json!({ "NUTS_ID": "SE22" }), 0.0, 0.0)]);
        let (boundaries, diagnostics) = read_nuts_geojson(&bytes).unwrap();
        assert_eq!(boundaries.groups()[0].group_label, "SE22 Sydsverige");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(boundaries.epsg(), 3035);
    }

    #[test]
    fn unlabelled_nuts_features_are_dropped() {
        let bytes = collection(vec![
            feature(json!({ "NUTS_ID": "SE99" }), 0.0, 0.0),
            feature(json!({ "NUTS_ID": "SE11", "NUTS_NAME": "Stockholm" }), 1.0, 0.0),
        ]);
        let (boundaries, diagnostics) = read_nuts_geojson(&bytes).unwrap();
        assert_eq!(boundaries.len(), 1);
        assert!(boundaries.get("SE11 Stockholm").is_some());
        // Only the drop is reported; the fixed table has no SE99 entry.
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.iter().all(|warning| warning.to_string().contains("dropped")));
    }

    #[test]
    fn name_only_features_match_by_name() {
        let bytes = collection(vec![
            feature(json!({ "NUTS_NAME": "Östra Mellansverige" }), 0.0, 0.0),
            feature(json!({ "NAME": "STOCKHOLM" }), 1.0, 0.0),
            feature(json!({ "NAME": "Åland" }), 2.0, 0.0),
        ]);
        let (boundaries, diagnostics) = read_nuts_geojson(&bytes).unwrap();
        let labels: Vec<_> = boundaries.groups().iter().map(|g| g.group_label.as_str()).collect();
        assert_eq!(labels, vec!["SE12 Östra Mellansverige", "SE11 Stockholm", "Åland"]);
        assert_eq!(boundaries.get("SE12 Östra Mellansverige").unwrap().group_id.as_deref(), Some("SE12"));
        assert_eq!(boundaries.get("Åland").unwrap().group_id, None);
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn nuts_feed_without_identifiers_fails() {
        let bytes = collection(vec![feature(json!({ "CNTR_CODE": "SE" }), 0.0, 0.0)]);
        assert!(read_nuts_geojson(&bytes).is_err());
    }

    #[test]
    fn nuts_duplicates_are_unioned() {
        let bytes = collection(vec![
            feature(json!({ "NUTS_ID": "SE21" }), 0.0, 0.0),
            feature(json!({ "NUTS_ID": "SE21" }), 1.0, 0.0),
        ]);
        let (boundaries, _) = read_nuts_geojson(&bytes).unwrap();
        assert_eq!(boundaries.len(), 1);
        assert!((boundaries.groups()[0].shape.unsigned_area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn boundaries_geojson_has_name_id_and_crs() {
        let boundaries = Boundaries::new(vec![
            MergedGeometry { group_label: "Syd".into(), group_id: Some("26".into()), shape: square(0.0, 0.0) },
            MergedGeometry { group_label: "Norra".into(), group_id: None, shape: square(1.0, 0.0) },
        ], 3035);
        let value = boundaries.to_geojson();
        assert_eq!(value["crs"]["properties"]["name"], "urn:ogc:def:crs:EPSG::3035");
        assert_eq!(value["features"][0]["properties"]["id"], "26");
        assert_eq!(value["features"][1]["properties"]["name"], "Norra");
        assert!(value["features"][1]["properties"].get("id").is_none());
        assert_eq!(value["features"][0]["geometry"]["type"], "MultiPolygon");
    }

    #[test]
    fn unsupported_crs_name_fails() {
        let bytes = serde_json::to_vec(&json!({
            "type": "FeatureCollection",
            "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::wgs" } },
            "features": [],
        })).unwrap();
        assert!(read_county_geojson(&bytes).is_err());
    }
}
