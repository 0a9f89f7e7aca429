use ndarray::{ArrayD, ArrayViewD};
use serde_json::{Number, Value};

use crate::schema::PredictionEntry;

/// Wrap a model output tensor as a success entry, keeping its shape as-is
pub fn format_embedding(embedding: &ArrayD<f32>) -> PredictionEntry {
    PredictionEntry::embedding(to_nested(embedding.view()))
}

/// Nested JSON arrays, one level per axis. A 0-d tensor is a bare number.
pub fn to_nested(view: ArrayViewD<'_, f32>) -> Value {
    if view.ndim() == 0 {
        return view.first().map_or(Value::Null, |&value| to_number(value));
    }
    Value::Array(view.outer_iter().map(to_nested).collect())
}

// NaN and infinities have no JSON representation
fn to_number(value: f32) -> Value {
    Number::from_f64(f64::from(value)).map_or(Value::Null, Value::Number)
}
