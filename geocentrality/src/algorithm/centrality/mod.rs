mod centrality_result;
mod centrality_scorer;
pub mod edge_betweenness;
mod edge_usage_table;
mod geographical;
mod route_aggregator;

pub use centrality_result::{CentralityResult, CentralityRow};
pub use centrality_scorer::{join_attributes, score};
pub use edge_betweenness::edge_betweenness_centrality;
pub use edge_usage_table::EdgeUsageTable;
pub use geographical::{GeographicalCentrality, GeographicalRun};
pub use route_aggregator::aggregate;
