use super::NodeId;
use geo::Point;
use serde::{Deserialize, Serialize};

/// a street network node with its (longitude, latitude) position.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub node_id: NodeId,
    pub x: f64,
    pub y: f64,
}

impl NodeData {
    pub fn new(node_id: NodeId, x: f64, y: f64) -> NodeData {
        NodeData { node_id, x, y }
    }

    pub fn get_point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
