use super::{AttributeValue, EdgeKey, NetworkError, Weight};
use geo::LineString;

/// a directed street segment in the road network along with the attributes
/// used for routing and reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    pub edge_key: EdgeKey,
    pub osmid: Option<AttributeValue>,
    pub highway: Option<AttributeValue>,
    /// raw OSM maxspeed tag, if present
    pub maxspeed: Option<String>,
    pub length_meters: f64,
    /// speed assigned during travel time derivation
    pub speed_kph: Option<f64>,
    pub travel_time_seconds: Option<f64>,
    pub geometry: LineString<f64>,
}

impl EdgeData {
    pub fn new(edge_key: EdgeKey, length_meters: f64, geometry: LineString<f64>) -> EdgeData {
        EdgeData {
            edge_key,
            osmid: None,
            highway: None,
            maxspeed: None,
            length_meters,
            speed_kph: None,
            travel_time_seconds: None,
            geometry,
        }
    }

    /// the cost of traversing this edge under the given weight.
    pub fn get_weight(&self, weight: Weight) -> Result<f64, NetworkError> {
        match weight {
            Weight::Length => Ok(self.length_meters),
            Weight::TravelTime => self
                .travel_time_seconds
                .ok_or(NetworkError::MissingEdgeWeight(self.edge_key, weight)),
        }
    }

    /// the highway class used for speed lookups. for list-valued highway tags
    /// the first entry is used.
    pub fn highway_class(&self) -> Option<&str> {
        self.highway.as_ref().and_then(|h| h.first())
    }

    /// confirms that the weights present on this edge are usable for routing.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if !self.length_meters.is_finite() || self.length_meters < 0.0 {
            return Err(NetworkError::InvalidEdgeWeight(
                self.edge_key,
                Weight::Length,
                self.length_meters,
            ));
        }
        if let Some(tt) = self.travel_time_seconds {
            if !tt.is_finite() || tt < 0.0 {
                return Err(NetworkError::InvalidEdgeWeight(
                    self.edge_key,
                    Weight::TravelTime,
                    tt,
                ));
            }
        }
        Ok(())
    }
}
