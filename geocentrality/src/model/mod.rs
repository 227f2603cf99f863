mod centrality_cli_error;
pub mod network;
pub mod output;
pub mod speed;
pub mod study_area;

pub use centrality_cli_error::CentralityCliError;
