mod attribute_value;
mod edge_attributes;
mod edge_data;
mod edge_key;
pub mod geometry_ops;
mod network_error;
pub mod network_reader;
mod node_data;
mod node_id;
pub mod road_graph;
mod weight;

pub use attribute_value::{deserialize_optional_attribute, AttributeValue};
pub use edge_attributes::{EdgeAttributeTable, EdgeAttributes};
pub use edge_data::EdgeData;
pub use edge_key::EdgeKey;
pub use network_error::NetworkError;
pub use node_data::NodeData;
pub use node_id::NodeId;
pub use road_graph::RoadGraph;
pub use weight::Weight;
