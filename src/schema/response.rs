use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions: Vec<PredictionEntry>,
}

/// Outcome for a single instance: `{"embedding": ...}` or `{"error": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionEntry {
    Embedding { embedding: Value },
    Error { error: ErrorDetail },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub description: String,
}

impl PredictionEntry {
    pub fn embedding(embedding: Value) -> Self {
        Self::Embedding { embedding }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::Error {
            error: ErrorDetail {
                description: description.into(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Client-facing error description, if this entry is an error
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(&error.description),
            Self::Embedding { .. } => None,
        }
    }
}
