use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response is missing `{0}`")]
    MissingField(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Another request is already in flight")]
    Busy,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] geogenie_common::Error),
}

impl GeoError {
    /// Network or server failure (as opposed to local or cancelled).
    pub fn is_remote(&self) -> bool {
        matches!(self, GeoError::Http(_) | GeoError::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
