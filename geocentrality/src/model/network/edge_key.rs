use super::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// composite identity of a single directed street segment.
///
/// a multigraph may hold several segments between the same (src, dst) pair.
/// the `key` discriminates between them, so two segments that share endpoints
/// are never merged when counting centrality.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct EdgeKey {
    pub src: NodeId,
    pub dst: NodeId,
    pub key: u32,
}

impl EdgeKey {
    pub fn new(src: NodeId, dst: NodeId, key: u32) -> EdgeKey {
        EdgeKey { src, dst, key }
    }
}

impl Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})-[{}]->({})", self.src, self.key, self.dst)
    }
}
