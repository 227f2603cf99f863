use super::{
    EdgeAttributeTable, EdgeAttributes, EdgeData, EdgeKey, NetworkError, NodeData, NodeId, Weight,
};
use geo::Point;
use itertools::Itertools;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rstar::primitives::GeomWithData;
use rstar::RTree;
use std::collections::HashMap;

pub type NodeLocation = GeomWithData<[f64; 2], NodeIndex>;

/// a directed street network multigraph.
///
/// nodes are addressed by [`NodeId`] and edges by their composite [`EdgeKey`]
/// so that parallel segments between the same node pair remain distinct.
/// the graph is immutable once built, apart from travel time assignment.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    graph: DiGraph<NodeData, EdgeData>,
    node_lookup: HashMap<NodeId, NodeIndex>,
    edge_lookup: HashMap<EdgeKey, EdgeIndex>,
    rtree: RTree<NodeLocation>,
}

impl RoadGraph {
    /// builds a road graph from node and edge records.
    ///
    /// fails if there are no nodes, if an id or key appears twice, if an edge
    /// references a missing node, or if any coordinate or weight is invalid.
    pub fn new(nodes: Vec<NodeData>, edges: Vec<EdgeData>) -> Result<RoadGraph, NetworkError> {
        if nodes.is_empty() {
            return Err(NetworkError::EmptyGraph);
        }
        let mut graph: DiGraph<NodeData, EdgeData> =
            DiGraph::with_capacity(nodes.len(), edges.len());
        let mut node_lookup: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());
        let mut edge_lookup: HashMap<EdgeKey, EdgeIndex> = HashMap::with_capacity(edges.len());

        for node in nodes.into_iter() {
            if !node.is_valid() {
                return Err(NetworkError::InvalidCoordinate(node.node_id, node.x, node.y));
            }
            let node_id = node.node_id;
            if node_lookup.contains_key(&node_id) {
                return Err(NetworkError::DuplicateNodeId(node_id));
            }
            let index = graph.add_node(node);
            node_lookup.insert(node_id, index);
        }

        for edge in edges.into_iter() {
            edge.validate()?;
            let key = edge.edge_key;
            if edge_lookup.contains_key(&key) {
                return Err(NetworkError::DuplicateEdgeKey(key));
            }
            let src = node_lookup
                .get(&key.src)
                .ok_or(NetworkError::EdgeMissingNodeId(key, key.src))?;
            let dst = node_lookup
                .get(&key.dst)
                .ok_or(NetworkError::EdgeMissingNodeId(key, key.dst))?;
            let index = graph.add_edge(*src, *dst, edge);
            edge_lookup.insert(key, index);
        }

        let locations = graph
            .node_indices()
            .map(|idx| GeomWithData::new([graph[idx].x, graph[idx].y], idx))
            .collect_vec();
        let rtree = RTree::bulk_load(locations);

        log::debug!(
            "built road graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(RoadGraph {
            graph,
            node_lookup,
            edge_lookup,
            rtree,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// helper with error handling for getting the edge data for a given edge key
    pub fn get_edge_data(&self, edge_key: &EdgeKey) -> Result<&EdgeData, NetworkError> {
        let index = self
            .edge_lookup
            .get(edge_key)
            .ok_or(NetworkError::GraphMissingEdgeKey(*edge_key))?;
        Ok(&self.graph[*index])
    }

    /// all edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeData> {
        self.graph.edge_weights()
    }

    /// all nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.node_weights()
    }

    /// finds the node closest to the given (x, y) point. distance is measured
    /// in coordinate space, as the network is unprojected.
    pub fn nearest_node(&self, point: &Point<f64>) -> Result<NodeId, NetworkError> {
        let nearest = self
            .rtree
            .nearest_neighbor(&[point.x(), point.y()])
            .ok_or(NetworkError::EmptyGraph)?;
        Ok(self.graph[nearest.data].node_id)
    }

    /// true if every edge carries a value for this weight.
    pub fn has_weight(&self, weight: Weight) -> bool {
        self.edges().all(|e| e.get_weight(weight).is_ok())
    }

    /// extracts the static attribute table of all edges.
    pub fn edge_attributes(&self) -> EdgeAttributeTable {
        self.edges()
            .map(|e| (e.edge_key, EdgeAttributes::from(e)))
            .collect()
    }

    pub(crate) fn node_index(&self, node_id: &NodeId) -> Result<NodeIndex, NetworkError> {
        self.node_lookup
            .get(node_id)
            .copied()
            .ok_or(NetworkError::GraphMissingNodeId(*node_id))
    }

    pub(crate) fn node_id_at(&self, index: NodeIndex) -> NodeId {
        self.graph[index].node_id
    }

    /// outgoing (edge, target node, edge data) triplets of a node, including
    /// every parallel edge.
    pub(crate) fn out_edges(
        &self,
        index: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &EdgeData)> {
        self.graph
            .edges_directed(index, Direction::Outgoing)
            .map(|e| (e.id(), e.target(), e.weight()))
    }

    pub(crate) fn edge_at(&self, index: EdgeIndex) -> &EdgeData {
        &self.graph[index]
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub(crate) fn edges_mut(&mut self) -> impl Iterator<Item = &mut EdgeData> {
        self.graph.edge_weights_mut()
    }
}
