use std::error::Error as StdError;
use thiserror::Error;

use crate::example::ConversionError;
use crate::gcs::{CredentialError, FetchError};
use crate::model::ModelError;

/// Why image bytes could not be obtained for an instance. Internal only.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("`{key}` must be a string")]
    NotAString { key: &'static str },

    #[error("Invalid base64 in `input_bytes`: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to build credential: {0}")]
    Credential(#[from] CredentialError),

    #[error("Failed to fetch remote object: {0}")]
    Fetch(#[from] FetchError),
}

/// A classified failure. `Display` is the client-safe message; the internal
/// cause, when there is one, is only reachable through `source()`.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Request has more than one image input. Must specify either `input_bytes` or `gcs_uri`.")]
    AmbiguousInput,

    #[error("Missing required `input_bytes` or `gcs_uri` key in request instance.")]
    MissingInput,

    #[error("Failed to retrieve data from request instance.")]
    RetrievalFailure(#[source] RetrievalError),

    #[error("Failed to process image to TF example.")]
    ConversionFailure(#[source] ConversionError),
}

/// Per-instance failure. `Display` is exactly the description sent to the client.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Failed to get prediction for instance. Reason: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Internal error getting prediction for instance.")]
    Internal(#[from] ModelError),
}

impl PredictionError {
    pub fn client_description(&self) -> String {
        self.to_string()
    }
}

/// Render an error and all of its sources, outermost first.
/// Causes already interpolated into an outer message are not repeated.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}
