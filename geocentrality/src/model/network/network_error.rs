use super::{EdgeKey, NodeId, Weight};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("road network has no nodes")]
    EmptyGraph,
    #[error("road network has no edges")]
    NoEdgesFound,
    #[error("attempting to insert node '{0}' already present in graph")]
    DuplicateNodeId(NodeId),
    #[error("attempting to insert edge {0} already present in graph")]
    DuplicateEdgeKey(EdgeKey),
    #[error("edge {0} references node '{1}' not in graph")]
    EdgeMissingNodeId(EdgeKey, NodeId),
    #[error("attempting to get node '{0}' not in graph")]
    GraphMissingNodeId(NodeId),
    #[error("attempting to get edge {0} not in graph")]
    GraphMissingEdgeKey(EdgeKey),
    #[error("node '{0}' has invalid coordinate ({1}, {2})")]
    InvalidCoordinate(NodeId, f64, f64),
    #[error("edge {0} has invalid {1} value {2}")]
    InvalidEdgeWeight(EdgeKey, Weight, f64),
    #[error("edge {0} has no {1} value; travel times must be assigned before routing by {1}")]
    MissingEdgeWeight(EdgeKey, Weight),
    #[error("unable to resolve a speed for edge {0} with highway tag '{1}'")]
    UnresolvedSpeed(EdgeKey, String),
    #[error("invalid maxspeed on edge {0}: {1}")]
    InvalidMaxspeed(EdgeKey, String),
    #[error("unable to deserialize WKT into geometry: {0}")]
    InvalidWKT(String),
    #[error("failure reading {0}: {1}")]
    CsvReadError(String, csv::Error),
    #[error("failure opening {0}: {1}")]
    FileOpenError(String, std::io::Error),
    #[error("{0}")]
    InternalError(String),
}
