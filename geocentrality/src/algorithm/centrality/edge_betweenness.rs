use super::{join_attributes, CentralityResult};
use crate::algorithm::CentralityError;
use crate::model::network::{EdgeKey, RoadGraph, Weight};
use itertools::Itertools;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

type NodePair = (usize, usize);

/// the road graph reduced to a simple weighted digraph for path counting.
/// parallel edges collapse to their minimum weight and remember which keys
/// share that minimum.
struct CollapsedGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    tied_keys: HashMap<NodePair, Vec<EdgeKey>>,
}

impl CollapsedGraph {
    fn new(graph: &RoadGraph, weight: Weight) -> Result<CollapsedGraph, CentralityError> {
        let mut min_edges: HashMap<NodePair, (f64, Vec<EdgeKey>)> = HashMap::new();
        for src in graph.node_indices() {
            for (_, dst, edge) in graph.out_edges(src) {
                let cost = edge.get_weight(weight)?;
                let entry = min_edges
                    .entry((src.index(), dst.index()))
                    .or_insert((cost, vec![]));
                match cost.total_cmp(&entry.0) {
                    Ordering::Less => *entry = (cost, vec![edge.edge_key]),
                    Ordering::Equal => entry.1.push(edge.edge_key),
                    Ordering::Greater => {}
                }
            }
        }
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![vec![]; graph.node_count()];
        for ((src, dst), (cost, _)) in min_edges.iter().sorted_by_key(|(k, _)| **k) {
            adjacency[*src].push((*dst, *cost));
        }
        let tied_keys = min_edges
            .into_iter()
            .map(|(pair, (_, keys))| (pair, keys))
            .collect();
        Ok(CollapsedGraph {
            adjacency,
            tied_keys,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct NodeDistance {
    node: usize,
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

/// exact weighted edge betweenness centrality of every edge in the graph.
///
/// computed with Brandes' algorithm from every source node in parallel. each
/// worker accumulates its own table and the tables are summed at the end.
/// values are normalized by `1 / (n (n - 1))`. the betweenness of a node pair
/// is split evenly between parallel edges sharing its minimum weight, and
/// parallel edges above that minimum score zero.
pub fn edge_betweenness_centrality(
    graph: &RoadGraph,
    weight: Weight,
) -> Result<CentralityResult<f64>, CentralityError> {
    if !graph.has_weight(weight) {
        return Err(CentralityError::MissingWeight(weight));
    }
    let collapsed = CollapsedGraph::new(graph, weight)?;
    let n = graph.node_count();
    log::info!("computing {weight} edge betweenness over {n} source nodes");

    let pair_betweenness = (0..n)
        .into_par_iter()
        .fold(HashMap::new, |mut acc: HashMap<NodePair, f64>, source| {
            accumulate_source(&collapsed.adjacency, source, &mut acc);
            acc
        })
        .reduce(HashMap::new, |mut a, b| {
            for (pair, value) in b {
                *a.entry(pair).or_insert(0.0) += value;
            }
            a
        });

    let scale = if n > 1 {
        1.0 / ((n * (n - 1)) as f64)
    } else {
        1.0
    };
    let mut values: HashMap<EdgeKey, f64> = graph.edges().map(|e| (e.edge_key, 0.0)).collect();
    for (pair, keys) in collapsed.tied_keys.iter() {
        let pair_value = pair_betweenness.get(pair).copied().unwrap_or_default();
        let per_key = pair_value * scale / keys.len() as f64;
        for key in keys {
            values.insert(*key, per_key);
        }
    }
    Ok(join_attributes(values, &graph.edge_attributes()))
}

/// single-source shortest path counting followed by dependency accumulation
/// onto the edges of the shortest path DAG.
fn accumulate_source(
    adjacency: &[Vec<(usize, f64)>],
    source: usize,
    betweenness: &mut HashMap<NodePair, f64>,
) {
    let n = adjacency.len();
    let mut dist: Vec<Option<f64>> = vec![None; n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut preds: Vec<Vec<usize>> = vec![vec![]; n];
    let mut visited: Vec<bool> = vec![false; n];
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut heap = BinaryHeap::new();

    dist[source] = Some(0.0);
    sigma[source] = 1.0;
    heap.push(NodeDistance {
        node: source,
        cost: 0.0,
    });

    while let Some(NodeDistance { node: v, cost }) = heap.pop() {
        if visited[v] {
            continue;
        }
        visited[v] = true;
        order.push(v);
        for (w, edge_cost) in adjacency[v].iter() {
            let w = *w;
            if visited[w] {
                continue;
            }
            let next_cost = cost + edge_cost;
            match dist[w] {
                Some(best) if next_cost > best => {}
                Some(best) if next_cost == best => {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
                _ => {
                    dist[w] = Some(next_cost);
                    sigma[w] = sigma[v];
                    preds[w] = vec![v];
                    heap.push(NodeDistance {
                        node: w,
                        cost: next_cost,
                    });
                }
            }
        }
    }

    let mut delta: Vec<f64> = vec![0.0; n];
    while let Some(w) = order.pop() {
        let coeff = (1.0 + delta[w]) / sigma[w];
        for v in preds[w].iter() {
            let c = sigma[*v] * coeff;
            *betweenness.entry((*v, w)).or_insert(0.0) += c;
            delta[*v] += c;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::edge_betweenness_centrality;
    use crate::model::network::road_graph::tests::{edge, unit_cycle};
    use crate::model::network::{EdgeKey, NodeData, NodeId, RoadGraph, Weight};

    fn key(src: i64, dst: i64, k: u32) -> EdgeKey {
        EdgeKey::new(NodeId(src), NodeId(dst), k)
    }

    fn line_nodes(n: i64) -> Vec<NodeData> {
        (1..=n)
            .map(|i| NodeData::new(NodeId(i), i as f64, 0.0))
            .collect()
    }

    fn value(result: &crate::algorithm::centrality::CentralityResult<f64>, k: EdgeKey) -> f64 {
        result
            .get(&k)
            .map(|r| r.centrality)
            .expect("every edge should be scored")
    }

    #[test]
    fn directed_path() {
        let nodes = line_nodes(3);
        let edges = vec![edge(1, 2, 0, 1.0, &nodes), edge(2, 3, 0, 1.0, &nodes)];
        let g = RoadGraph::new(nodes, edges).expect("valid graph");
        let result = edge_betweenness_centrality(&g, Weight::Length).expect("should compute");
        assert_eq!(result.len(), 2);
        // each edge lies on 2 of the 6 ordered pairs
        assert!((value(&result, key(1, 2, 0)) - 1.0 / 3.0).abs() < 1e-12);
        assert!((value(&result, key(2, 3, 0)) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn tied_parallel_edges_split() {
        let nodes = line_nodes(2);
        let edges = vec![
            edge(1, 2, 0, 1.0, &nodes),
            edge(1, 2, 1, 1.0, &nodes),
            edge(1, 2, 2, 5.0, &nodes),
        ];
        let g = RoadGraph::new(nodes, edges).expect("valid graph");
        let result = edge_betweenness_centrality(&g, Weight::Length).expect("should compute");
        assert_eq!(result.len(), 3);
        assert!((value(&result, key(1, 2, 0)) - 0.25).abs() < 1e-12);
        assert!((value(&result, key(1, 2, 1)) - 0.25).abs() < 1e-12);
        assert_eq!(value(&result, key(1, 2, 2)), 0.0);
    }

    #[test]
    fn symmetric_cycle() {
        let g = unit_cycle();
        let result = edge_betweenness_centrality(&g, Weight::Length).expect("should compute");
        assert_eq!(result.len(), 8);
        for row in result.rows() {
            // 16 edge traversals over 12 ordered pairs spread evenly on 8 edges
            assert!(
                (row.centrality - 1.0 / 6.0).abs() < 1e-12,
                "edge {} has {}",
                row.edge_key,
                row.centrality
            );
            assert!(row.geometry.is_some());
        }
    }

    #[test]
    fn weights_change_paths() {
        let nodes = line_nodes(3);
        let edges = vec![
            edge(1, 3, 0, 10.0, &nodes),
            edge(1, 2, 0, 1.0, &nodes),
            edge(2, 3, 0, 1.0, &nodes),
        ];
        let g = RoadGraph::new(nodes, edges).expect("valid graph");
        let result = edge_betweenness_centrality(&g, Weight::Length).expect("should compute");
        assert_eq!(value(&result, key(1, 3, 0)), 0.0);
        for row in result.rows() {
            assert!(row.centrality >= 0.0 && row.centrality < 1.0);
        }
    }

    #[test]
    fn missing_weight_fails() {
        let g = unit_cycle();
        assert!(edge_betweenness_centrality(&g, Weight::TravelTime).is_err());
    }
}
