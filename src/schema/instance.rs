use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const INPUT_BYTES_KEY: &str = "input_bytes";
pub const GCS_URI_KEY: &str = "gcs_uri";
pub const BEARER_TOKEN_KEY: &str = "bearer_token";

/// One unit of work within a request.
///
/// Kept as the raw JSON value so that a malformed instance (wrong value type,
/// not an object at all) fails on its own instead of failing the whole
/// request at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instance(Value);

impl Instance {
    /// An instance with no keys
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Inline image payload, base64-encoded on the way in
    pub fn from_bytes(image_bytes: &[u8]) -> Self {
        let mut fields = Map::new();
        fields.insert(
            INPUT_BYTES_KEY.to_string(),
            Value::String(STANDARD.encode(image_bytes)),
        );
        Self(Value::Object(fields))
    }

    /// Remote object reference with an optional bearer token
    pub fn from_gcs(uri: impl Into<String>, bearer_token: Option<&str>) -> Self {
        let mut fields = Map::new();
        fields.insert(GCS_URI_KEY.to_string(), Value::String(uri.into()));
        if let Some(token) = bearer_token {
            fields.insert(BEARER_TOKEN_KEY.to_string(), Value::String(token.to_string()));
        }
        Self(Value::Object(fields))
    }

    pub fn input_bytes(&self) -> Option<&Value> {
        self.0.get(INPUT_BYTES_KEY)
    }

    pub fn gcs_uri(&self) -> Option<&Value> {
        self.0.get(GCS_URI_KEY)
    }

    pub fn bearer_token(&self) -> Option<&Value> {
        self.0.get(BEARER_TOKEN_KEY)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Instance {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
