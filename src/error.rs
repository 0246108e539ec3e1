use thiserror::Error;

/// Main error type for Synastry
#[derive(Error, Debug)]
pub enum SynastryError {
    /// Input profile failed structural validation (missing day master name,
    /// empty pillar stem/branch, empty sun sign)
    #[error("Validation error: {0}")]
    Validation(String),

    /// File system I/O errors (CLI profile loading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile / payload JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient Result type using SynastryError
pub type Result<T> = std::result::Result<T, SynastryError>;
