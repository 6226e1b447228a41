use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Selection error: {0}")]
    Select(#[from] hls_streams::SelectError),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("No playable streams found in the playlist")]
    NoStreamsAvailable,
}

impl CliError {
    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }

    pub fn no_streams_found() -> Self {
        Self::NoStreamsAvailable
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
