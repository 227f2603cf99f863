mod centrality_config;

pub use centrality_config::CentralityConfiguration;
