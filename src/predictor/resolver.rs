// resolver.rs - one request instance -> one model-ready tensor
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use prost::Message;
use serde_json::Value;
use tracing::{debug, info};

use super::error::{ResolutionError, RetrievalError};
use crate::example::ExampleConverter;
use crate::gcs::{CredentialFactory, ObjectFetcher};
use crate::model::ModelInput;
use crate::schema::{BEARER_TOKEN_KEY, GCS_URI_KEY, INPUT_BYTES_KEY, Instance};

pub struct InputResolver {
    fetcher: Box<dyn ObjectFetcher>,
    credentials: Box<dyn CredentialFactory>,
    converter: Box<dyn ExampleConverter>,
}

impl InputResolver {
    pub fn new(
        fetcher: Box<dyn ObjectFetcher>,
        credentials: Box<dyn CredentialFactory>,
        converter: Box<dyn ExampleConverter>,
    ) -> Self {
        Self {
            fetcher,
            credentials,
            converter,
        }
    }

    /// Resolve an instance into a length-1 tensor holding one serialized example
    pub fn resolve(&self, instance: &Instance) -> Result<ModelInput, ResolutionError> {
        let image_bytes = self.image_bytes(instance)?;
        debug!(size = image_bytes.len(), "Retrieved image bytes");

        let example = self
            .converter
            .convert(&image_bytes)
            .map_err(ResolutionError::ConversionFailure)?;
        debug!("Processed image to TF example");

        Ok(ModelInput::single(example.encode_to_vec()))
    }

    fn image_bytes(&self, instance: &Instance) -> Result<Vec<u8>, ResolutionError> {
        match (instance.input_bytes(), instance.gcs_uri()) {
            (Some(_), Some(_)) => Err(ResolutionError::AmbiguousInput),
            (Some(encoded), None) => {
                decode_input_bytes(encoded).map_err(ResolutionError::RetrievalFailure)
            }
            (None, Some(uri)) => self
                .fetch(uri, instance.bearer_token())
                .map_err(ResolutionError::RetrievalFailure),
            (None, None) => Err(ResolutionError::MissingInput),
        }
    }

    fn fetch(&self, uri: &Value, bearer_token: Option<&Value>) -> Result<Vec<u8>, RetrievalError> {
        let uri = as_str(uri, GCS_URI_KEY)?;

        // Scoped to this fetch; dropped before the next instance
        let credential = bearer_token
            .map(|token| as_str(token, BEARER_TOKEN_KEY))
            .transpose()?
            .map(|token| self.credentials.build(token))
            .transpose()?;

        info!(uri, "Retrieving file bytes from GCS");
        Ok(self.fetcher.fetch(uri, credential.as_ref())?)
    }
}

/// Lenient decode: characters outside the base64 alphabet (line breaks from
/// MIME-wrapped payloads, stray spaces) are dropped before decoding.
fn decode_input_bytes(encoded: &Value) -> Result<Vec<u8>, RetrievalError> {
    let encoded = as_str(encoded, INPUT_BYTES_KEY)?;
    let alphabet: Vec<u8> = encoded
        .bytes()
        .filter(|&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        .collect();
    Ok(STANDARD.decode(alphabet)?)
}

fn as_str<'a>(value: &'a Value, key: &'static str) -> Result<&'a str, RetrievalError> {
    value.as_str().ok_or(RetrievalError::NotAString { key })
}
