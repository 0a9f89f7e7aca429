// the endpoint's JSON contract
mod instance;
mod response;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

pub use instance::{BEARER_TOKEN_KEY, GCS_URI_KEY, INPUT_BYTES_KEY, Instance};
pub use response::{ErrorDetail, PredictionEntry, PredictionResponse};

/// A batched prediction request. Instance order is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub instances: Vec<Instance>,
}

impl PredictionRequest {
    pub fn new(instances: Vec<Instance>) -> Self {
        Self { instances }
    }
}
