use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyAreaError {
    #[error("study area '{0}' has an empty polygon")]
    EmptyPolygon(String),
    #[error("study area '{0}' has a polygon with zero area")]
    ZeroArea(String),
    #[error("study area '{0}' has an invalid polygon: {1}")]
    InvalidGeometry(String, String),
    #[error("unable to read study area file {0}: {1}")]
    FileReadError(String, std::io::Error),
}
