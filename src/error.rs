use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data load error: {0}")]
    DataLoad(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
