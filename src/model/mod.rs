// Model execution interface
mod input;
mod rest;


pub use input::ModelInput;
pub use rest::{RestModelRunner, nested_to_array, request_body, select_output};

use ndarray::ArrayD;
use thiserror::Error;

/// Output key selecting the embedding tensor
pub const EMBEDDING_OUTPUT_KEY: &str = "embedding";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Model server returned error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Model response has no output named `{0}`")]
    MissingOutput(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Output tensor shape mismatch: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Runs the model on a batch of serialized examples and returns one named output.
///
/// Outputs are served as `f32`, the embedding model's dtype, so integral
/// values come back as floats (`1` is sent as `1.0`).
pub trait ModelRunner: Send + Sync {
    fn run(&self, input: &ModelInput, output_key: &str) -> Result<ArrayD<f32>, ModelError>;
}
