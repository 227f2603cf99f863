use super::{network::NetworkError, output::OutputError, study_area::StudyAreaError};
use crate::algorithm::CentralityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CentralityCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure computing centrality: {source}")]
    CentralityError {
        #[from]
        source: CentralityError,
    },
    #[error("failure reading road network: {source}")]
    NetworkError {
        #[from]
        source: NetworkError,
    },
    #[error("failure reading study area: {source}")]
    StudyAreaError {
        #[from]
        source: StudyAreaError,
    },
    #[error("failure writing output: {source}")]
    OutputError {
        #[from]
        source: OutputError,
    },
    #[error("failure reading configuration: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure decoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
