use super::StudyAreaError;
use crate::model::network::geometry_ops;
use geo::{Area, BoundingRect, Contains, Point, Polygon, Rect};
use std::path::Path;

/// the polygon that confines random trip endpoints during a run.
///
/// coordinates are (longitude, latitude). the polygon may be non-convex and
/// may carry holes. containment is boundary-exclusive: a point on the exterior
/// ring (or on the ring of a hole) is not inside the study area.
#[derive(Debug, Clone)]
pub struct StudyArea {
    name: String,
    polygon: Polygon<f64>,
    bounds: Rect<f64>,
}

impl StudyArea {
    /// validates the polygon and derives its bounding box. fails for an empty
    /// polygon, non-finite coordinates, or a polygon with zero area, since no
    /// point could ever be sampled inside of it.
    pub fn new(name: &str, polygon: Polygon<f64>) -> Result<StudyArea, StudyAreaError> {
        let name = String::from(name);
        if polygon.exterior().0.is_empty() {
            return Err(StudyAreaError::EmptyPolygon(name));
        }
        let finite = polygon
            .exterior()
            .coords()
            .chain(polygon.interiors().iter().flat_map(|r| r.coords()))
            .all(|c| c.x.is_finite() && c.y.is_finite());
        if !finite {
            return Err(StudyAreaError::InvalidGeometry(
                name,
                String::from("polygon has non-finite coordinates"),
            ));
        }
        let area = polygon.unsigned_area();
        if area <= 0.0 || !area.is_finite() {
            return Err(StudyAreaError::ZeroArea(name));
        }
        let bounds = polygon
            .bounding_rect()
            .ok_or_else(|| StudyAreaError::EmptyPolygon(name.clone()))?;
        Ok(StudyArea {
            name,
            polygon,
            bounds,
        })
    }

    /// reads a study area from a WKT string holding a POLYGON (or a
    /// MULTIPOLYGON with a single member).
    pub fn from_wkt_str(name: &str, wkt: &str) -> Result<StudyArea, StudyAreaError> {
        let polygon = geometry_ops::wkt_to_polygon(wkt)
            .map_err(|e| StudyAreaError::InvalidGeometry(String::from(name), e))?;
        StudyArea::new(name, polygon)
    }

    /// reads a study area from a file containing WKT.
    pub fn from_wkt_file(name: &str, path: &Path) -> Result<StudyArea, StudyAreaError> {
        let wkt = std::fs::read_to_string(path)
            .map_err(|e| StudyAreaError::FileReadError(path.to_string_lossy().to_string(), e))?;
        let study_area = StudyArea::from_wkt_str(name, &wkt)?;
        log::info!(
            "loaded study area '{}' from {} with bounds {:?}",
            study_area.name,
            path.display(),
            study_area.bounds
        );
        Ok(study_area)
    }

    /// human-readable description of the area, typically a region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    pub fn bounding_rect(&self) -> Rect<f64> {
        self.bounds
    }

    /// true if the point lies strictly inside the polygon.
    pub fn contains(&self, point: &Point<f64>) -> bool {
        self.polygon.contains(point)
    }
}
