use crate::model::network::{EdgeKey, NetworkError, NodeId, RoadGraph, Weight};
use itertools::Itertools;
use petgraph::graph::{EdgeIndex, NodeIndex};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// a weighted shortest path as the ordered sequence of traversed edges.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub edges: Vec<EdgeKey>,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy)]
struct NodeDistance {
    node: NodeIndex,
    cost: f64,
}

// reversed on cost so that the BinaryHeap pops the cheapest node first
impl Ord for NodeDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for NodeDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeDistance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeDistance {}

/// cheapest edge to each outgoing neighbor of a node, ordered by neighbor.
/// among parallel edges the lowest cost wins, then the lowest key.
fn cheapest_out_edges(
    graph: &RoadGraph,
    node: NodeIndex,
    weight: Weight,
) -> Result<Vec<(NodeIndex, f64, EdgeIndex)>, NetworkError> {
    let mut cheapest: HashMap<NodeIndex, (f64, EdgeIndex)> = HashMap::new();
    for (edge_index, target, edge) in graph.out_edges(node) {
        let cost = edge.get_weight(weight)?;
        match cheapest.get(&target) {
            Some((best_cost, best_index)) => {
                let best_key = graph.edge_at(*best_index).edge_key;
                if cost < *best_cost || (cost == *best_cost && edge.edge_key < best_key) {
                    cheapest.insert(target, (cost, edge_index));
                }
            }
            None => {
                cheapest.insert(target, (cost, edge_index));
            }
        }
    }
    let result = cheapest
        .into_iter()
        .map(|(target, (cost, edge_index))| (target, cost, edge_index))
        .sorted_by_key(|(target, _, _)| *target)
        .collect_vec();
    Ok(result)
}

/// finds the cheapest path from `source` to `target` under `weight`.
///
/// returns None when the target is unreachable. a path from a node to
/// itself is empty. parallel edges are resolved to the cheapest one, so the
/// composite key of the edge actually traversed is preserved.
pub fn shortest_path(
    graph: &RoadGraph,
    source: NodeId,
    target: NodeId,
    weight: Weight,
) -> Result<Option<ShortestPath>, NetworkError> {
    let source_index = graph.node_index(&source)?;
    let target_index = graph.node_index(&target)?;

    let mut costs: HashMap<NodeIndex, f64> = HashMap::from([(source_index, 0.0)]);
    let mut predecessors: HashMap<NodeIndex, EdgeIndex> = HashMap::new();
    let mut heap = BinaryHeap::new();
    heap.push(NodeDistance {
        node: source_index,
        cost: 0.0,
    });

    while let Some(NodeDistance { node, cost }) = heap.pop() {
        if node == target_index {
            let edges = walk_back(graph, &predecessors, source_index, target_index)?;
            return Ok(Some(ShortestPath { edges, cost }));
        }
        // stale heap entry
        if costs.get(&node).is_some_and(|best| cost > *best) {
            continue;
        }
        for (next, edge_cost, edge_index) in cheapest_out_edges(graph, node, weight)? {
            let next_cost = cost + edge_cost;
            let improved = costs.get(&next).map_or(true, |best| next_cost < *best);
            if improved {
                costs.insert(next, next_cost);
                predecessors.insert(next, edge_index);
                heap.push(NodeDistance {
                    node: next,
                    cost: next_cost,
                });
            }
        }
    }
    Ok(None)
}

fn walk_back(
    graph: &RoadGraph,
    predecessors: &HashMap<NodeIndex, EdgeIndex>,
    source: NodeIndex,
    target: NodeIndex,
) -> Result<Vec<EdgeKey>, NetworkError> {
    let mut edges = vec![];
    let mut current = target;
    while current != source {
        let edge_index = predecessors.get(&current).ok_or_else(|| {
            NetworkError::InternalError(format!(
                "node '{}' reached without a predecessor edge",
                graph.node_id_at(current)
            ))
        })?;
        let edge = graph.edge_at(*edge_index);
        edges.push(edge.edge_key);
        current = graph.node_index(&edge.edge_key.src)?;
    }
    edges.reverse();
    Ok(edges)
}
