use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::{proj::Proj as Proj4, transform::transform};

use super::{Boundaries, MergedGeometry, RegionGeometries, RegionGeometry};

/// PROJ.4 definition of a supported EPSG code.
fn proj4_string(epsg: u32) -> Result<&'static str> {
    Ok(match epsg {
        4326 => "+proj=longlat +datum=WGS84 +no_defs +type=crs",
        4258 => "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs +type=crs",
        3035 => "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs",
        3006 => "+proj=utm +zone=33 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs",
        _ => bail!("[geometry::proj] Unsupported EPSG code: {epsg}"),
    })
}

/// Geographic systems take and return degrees; proj4rs works in radians.
#[inline]
fn is_geographic(epsg: u32) -> bool { matches!(epsg, 4326 | 4258) }

/// Transforms coordinates between two EPSG codes.
struct Reprojection {
    from: (u32, Proj4),
    to: (u32, Proj4),
}

impl Reprojection {
    fn new(from: u32, to: u32) -> Result<Self> {
        let build = |epsg: u32| -> Result<(u32, Proj4)> {
            let proj_string = proj4_string(epsg)?;
            let proj = Proj4::from_proj_string(proj_string)
                .with_context(|| anyhow!("[geometry::proj] Failed to build PROJ.4: {proj_string}"))?;
            Ok((epsg, proj))
        };
        Ok(Self { from: build(from)?, to: build(to)? })
    }

    fn shape(&self, shape: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        let (from_epsg, from) = (&self.from.0, &self.from.1);
        let (to_epsg, to) = (&self.to.0, &self.to.1);
        let projected = shape.try_map_coords(|coord: Coord<f64>| {
            let mut point = if is_geographic(*from_epsg) {
                (coord.x.to_radians(), coord.y.to_radians(), 0.0)
            } else {
                (coord.x, coord.y, 0.0)
            };
            transform(from, to, &mut point)?;
            Ok::<_, proj4rs::errors::Error>(if is_geographic(*to_epsg) {
                Coord { x: point.0.to_degrees(), y: point.1.to_degrees() }
            } else {
                Coord { x: point.0, y: point.1 }
            })
        });
        projected.with_context(|| format!("[geometry::proj] CRS transform {from_epsg} -> {to_epsg} failed"))
    }
}

impl RegionGeometries {
    /// Copy of the feed in another reference system.
    pub fn reproject(&self, epsg: u32) -> Result<RegionGeometries> {
        if epsg == self.epsg() { return Ok(self.clone()) }
        let reprojection = Reprojection::new(self.epsg(), epsg)?;
        let regions = self.regions().iter()
            .map(|region| Ok(RegionGeometry {
                name: region.name.clone(),
                shape: reprojection.shape(&region.shape)?,
            }))
            .collect::<Result<Vec<_>>>()?;
        Ok(RegionGeometries::new(regions, epsg))
    }
}

impl Boundaries {
    /// Copy of the boundaries in another reference system.
    pub fn reproject(&self, epsg: u32) -> Result<Boundaries> {
        if epsg == self.epsg() { return Ok(self.clone()) }
        let reprojection = Reprojection::new(self.epsg(), epsg)?;
        let groups = self.groups().iter()
            .map(|group| Ok(MergedGeometry {
                group_label: group.group_label.clone(),
                group_id: group.group_id.clone(),
                shape: reprojection.shape(&group.shape)?,
            }))
            .collect::<Result<Vec<_>>>()?;
        Ok(Boundaries::new(groups, epsg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::fixtures::square;

    fn first_coord(shape: &MultiPolygon<f64>) -> Coord<f64> {
        shape.0[0].exterior().0[0]
    }

    #[test]
    fn laea_origin_maps_to_false_origin() {
        // (10E, 52N) is the projection centre of EPSG:3035.
        let source = RegionGeometries::new(
            vec![RegionGeometry { name: "Skåne".into(), shape: square(10.0, 52.0) }],
            4326,
        );
        let projected = source.reproject(3035).unwrap();
        let origin = first_coord(&projected.regions()[0].shape);
        assert_eq!(projected.epsg(), 3035);
        assert!((origin.x - 4321000.0).abs() < 1.0, "{origin:?}");
        assert!((origin.y - 3210000.0).abs() < 1.0, "{origin:?}");
    }

    #[test]
    fn round_trip_returns_to_start() {
        let source = Boundaries::new(
            vec![MergedGeometry { group_label: "Syd".into(), group_id: Some("26".into()), shape: square(13.0, 55.5) }],
            4326,
        );
        let back = source.reproject(3006).unwrap().reproject(4326).unwrap();
        let (a, b) = (first_coord(&source.groups()[0].shape), first_coord(&back.groups()[0].shape));
        assert!((a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6, "{a:?} vs {b:?}");
        assert_eq!(back.groups()[0].group_id.as_deref(), Some("26"));
    }

    #[test]
    fn same_epsg_is_a_copy_and_unknown_epsg_fails() {
        let source = Boundaries::new(vec![], 4326);
        assert_eq!(source.reproject(4326).unwrap(), source);
        assert!(source.reproject(2154).is_err());
    }
}
