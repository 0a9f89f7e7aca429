use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid GCS URI: {0}")]
    InvalidUri(String),

    #[error("Invalid storage endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Storage returned status {status} for {uri}")]
    Status { status: u16, uri: String },
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Bearer token cannot be used as an authorization header")]
    InvalidToken,
}
