use crate::model::network::{EdgeKey, NodeId};
use serde::Serialize;

/// an accepted random route: its endpoints and the ordered edges of the
/// shortest path between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRecord {
    pub origin: NodeId,
    pub destination: NodeId,
    pub edges: Vec<EdgeKey>,
    /// total weight of the path
    pub cost: f64,
}

impl RouteRecord {
    /// number of edges traversed.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
