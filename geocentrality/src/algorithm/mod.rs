pub mod centrality;
mod centrality_error;
pub mod routing;
pub mod sampling;

pub use centrality_error::CentralityError;
