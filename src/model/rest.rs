// TensorFlow Serving REST predict client
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use ndarray::{ArrayD, IxDyn};
use reqwest::blocking::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

use super::{ModelError, ModelInput, ModelRunner};

pub struct RestModelRunner {
    http: Client,
    predict_url: String,
}

impl RestModelRunner {
    pub fn new(endpoint: &str, model_name: &str) -> Result<Self, ModelError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            predict_url: predict_url(endpoint, model_name),
        })
    }

    pub fn with_timeout(
        endpoint: &str,
        model_name: &str,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            predict_url: predict_url(endpoint, model_name),
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

impl ModelRunner for RestModelRunner {
    fn run(&self, input: &ModelInput, output_key: &str) -> Result<ArrayD<f32>, ModelError> {
        let response = self
            .http
            .post(&self.predict_url)
            .json(&request_body(input))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json()?;
        let output = select_output(body, output_key)?;
        debug!(shape = ?output.shape(), "Received model output");
        Ok(output)
    }
}

fn predict_url(endpoint: &str, model_name: &str) -> String {
    format!(
        "{}/v1/models/{}:predict",
        endpoint.trim_end_matches('/'),
        model_name
    )
}

/// Columnar predict request carrying each serialized example as `{"b64": ...}`
pub fn request_body(input: &ModelInput) -> Value {
    let inputs: Vec<Value> = input
        .examples()
        .iter()
        .map(|example| json!({ "b64": STANDARD.encode(example) }))
        .collect();
    json!({ "inputs": inputs })
}

/// Pick `output_key` out of a predict response.
///
/// A model with a single output returns the tensor directly under `outputs`;
/// one with several returns an object keyed by output name.
pub fn select_output(body: Value, output_key: &str) -> Result<ArrayD<f32>, ModelError> {
    let outputs = match body {
        Value::Object(mut fields) => fields
            .remove("outputs")
            .ok_or_else(|| ModelError::MalformedOutput("response has no `outputs`".to_string()))?,
        _ => {
            return Err(ModelError::MalformedOutput(
                "response is not a JSON object".to_string(),
            ));
        }
    };

    match outputs {
        Value::Object(mut named) => {
            let tensor = named
                .remove(output_key)
                .ok_or_else(|| ModelError::MissingOutput(output_key.to_string()))?;
            nested_to_array(&tensor)
        }
        tensor => nested_to_array(&tensor),
    }
}

/// Convert a rectangular nested JSON array of numbers into a tensor.
///
/// The shape is read off the first element at each depth and only trusted
/// once `flatten` has matched every array against it.
pub fn nested_to_array(value: &Value) -> Result<ArrayD<f32>, ModelError> {
    let mut shape = Vec::new();
    let mut cursor = value;
    while let Value::Array(items) = cursor {
        shape.push(items.len());
        match items.first() {
            Some(first) => cursor = first,
            None => break,
        }
    }

    let mut data = Vec::new();
    flatten(value, &shape, &mut data)?;
    Ok(ArrayD::from_shape_vec(IxDyn(&shape), data)?)
}

fn flatten(value: &Value, shape: &[usize], data: &mut Vec<f32>) -> Result<(), ModelError> {
    match (value, shape.split_first()) {
        (Value::Array(items), Some((&len, rest))) if items.len() == len => {
            for item in items {
                flatten(item, rest, data)?;
            }
            Ok(())
        }
        (Value::Number(number), None) => {
            let number = number.as_f64().ok_or_else(|| {
                ModelError::MalformedOutput(format!("{number} is not representable as f32"))
            })?;
            data.push(number as f32);
            Ok(())
        }
        (Value::Array(_), _) => Err(ModelError::MalformedOutput(
            "ragged output tensor".to_string(),
        )),
        (other, _) => Err(ModelError::MalformedOutput(format!(
            "unexpected value in output tensor: {other}"
        ))),
    }
}
