use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("unable to create directory {0}: {1}")]
    DirectoryError(String, std::io::Error),
    #[error("failure writing {0}: {1}")]
    IoError(String, std::io::Error),
    #[error("failure writing {0}: {1}")]
    CsvWriteError(String, csv::Error),
    #[error("failure writing {0}: {1}")]
    JsonWriteError(String, serde_json::Error),
}
