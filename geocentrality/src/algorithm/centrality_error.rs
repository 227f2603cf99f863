use crate::model::{
    network::{NetworkError, Weight},
    study_area::StudyAreaError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CentralityError {
    #[error(transparent)]
    NetworkError(#[from] NetworkError),
    #[error(transparent)]
    StudyAreaError(#[from] StudyAreaError),
    #[error("number of routes must be positive")]
    ZeroRoutes,
    #[error("road network has no {0} weight on every edge")]
    MissingWeight(Weight),
    #[error("invalid retry policy: {0}")]
    InvalidRetryPolicy(String),
    #[error("road network with {0} nodes and {1} edges cannot route any of {2} routes in '{3}'")]
    UnroutableNetwork(usize, usize, usize, String),
    #[error("retries exhausted after {0} attempts while generating {1} routes in '{2}'")]
    RetriesExhausted(u64, usize, String),
    #[error("sampler exhausted after {0} candidate batches while drawing {1} points in '{2}'")]
    SamplerExhausted(u64, usize, String),
    #[error("no centrality data: {0} routes in '{1}' traversed no edges")]
    NoCentralityData(usize, String),
    #[error("{0}")]
    InternalError(String),
}
