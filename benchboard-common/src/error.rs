use thiserror::Error;

/// Main error type for benchboard
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected status {status} for {path}")]
    Status { status: u16, path: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

impl From<toml::de::Error> for BoardError {
    fn from(error: toml::de::Error) -> Self {
        BoardError::Config(error.to_string())
    }
}

impl From<toml::ser::Error> for BoardError {
    fn from(error: toml::ser::Error) -> Self {
        BoardError::Config(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
