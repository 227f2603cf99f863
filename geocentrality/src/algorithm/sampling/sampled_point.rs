use crate::model::study_area::StudyArea;
use geo::Point;

/// a candidate point drawn from the bounding box of a study area, tagged with
/// whether it fell inside the polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledPoint {
    pub point: Point<f64>,
    pub inside: bool,
}

impl SampledPoint {
    pub fn new(point: Point<f64>, study_area: &StudyArea) -> SampledPoint {
        SampledPoint {
            point,
            inside: study_area.contains(&point),
        }
    }
}
