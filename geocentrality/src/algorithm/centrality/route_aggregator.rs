use crate::algorithm::routing::RouteRecord;
use crate::model::network::EdgeKey;

/// concatenates the edge sequences of all routes into one occurrence list.
/// order within each route is preserved and nothing is deduplicated.
pub fn aggregate(routes: &[RouteRecord]) -> Vec<EdgeKey> {
    routes
        .iter()
        .flat_map(|r| r.edges.iter().copied())
        .collect()
}
