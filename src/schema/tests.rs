use super::*;
use serde_json::json;

#[test]
fn test_request_parses_mixed_instances() {
    let request: PredictionRequest = serde_json::from_value(json!({
        "instances": [
            {"input_bytes": "c29tZV9ieXRlcw=="},
            {"gcs_uri": "gs://bucket/file.png", "bearer_token": "my_token"},
            {}
        ]
    }))
    .unwrap();

    assert_eq!(request.instances.len(), 3);
    assert_eq!(
        request.instances[0].input_bytes(),
        Some(&json!("c29tZV9ieXRlcw=="))
    );
    assert!(request.instances[0].gcs_uri().is_none());
    assert_eq!(
        request.instances[1].gcs_uri(),
        Some(&json!("gs://bucket/file.png"))
    );
    assert_eq!(request.instances[1].bearer_token(), Some(&json!("my_token")));
    assert!(request.instances[2].input_bytes().is_none());
    assert!(request.instances[2].gcs_uri().is_none());
}

#[test]
fn test_malformed_instance_does_not_fail_request() {
    let request: PredictionRequest = serde_json::from_value(json!({
        "instances": [{"input_bytes": 42}, "not an object", null]
    }))
    .unwrap();

    assert_eq!(request.instances.len(), 3);
    assert_eq!(request.instances[0].input_bytes(), Some(&json!(42)));
    assert!(request.instances[1].input_bytes().is_none());
    assert!(request.instances[2].gcs_uri().is_none());
}

#[test]
fn test_request_without_instances_is_rejected() {
    let result: Result<PredictionRequest, _> = serde_json::from_value(json!({"foo": []}));
    assert!(result.is_err());
}

#[test]
fn test_instance_constructors() {
    let inline = Instance::from_bytes(b"some_bytes");
    assert_eq!(inline.as_value(), &json!({"input_bytes": "c29tZV9ieXRlcw=="}));

    let remote = Instance::from_gcs("gs://bucket/file.png", Some("my_token"));
    assert_eq!(
        remote.as_value(),
        &json!({"gcs_uri": "gs://bucket/file.png", "bearer_token": "my_token"})
    );

    let anonymous = Instance::from_gcs("gs://bucket/file.png", None);
    assert!(anonymous.bearer_token().is_none());

    assert_eq!(Instance::empty().as_value(), &json!({}));
}

#[test]
fn test_response_wire_format() {
    let response = PredictionResponse {
        predictions: vec![
            PredictionEntry::error("Internal error getting prediction for instance."),
            PredictionEntry::embedding(json!([[1.0, 2.0, 3.0]])),
        ],
    };

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "predictions": [
                {"error": {"description": "Internal error getting prediction for instance."}},
                {"embedding": [[1.0, 2.0, 3.0]]}
            ]
        })
    );
}

#[test]
fn test_response_entries_deserialize_by_shape() {
    let response: PredictionResponse = serde_json::from_value(json!({
        "predictions": [
            {"embedding": [0.5]},
            {"error": {"description": "boom"}}
        ]
    }))
    .unwrap();

    assert!(!response.predictions[0].is_error());
    assert!(response.predictions[1].is_error());
    assert_eq!(response.predictions[1].description(), Some("boom"));
    assert_eq!(response.predictions[0].description(), None);
}
