use clap::Parser;
use std::time::Duration;

use crate::example::PngExampleConverter;
use crate::gcs::{BearerCredentialFactory, DEFAULT_GCS_ENDPOINT, FetchError, GcsFetcher};
use crate::model::{ModelError, RestModelRunner};
use crate::predictor::Predictor;

/// Run embedding predictions for a batch request
#[derive(Debug, Clone, Parser)]
#[command(name = "derm-serving", version, about)]
pub struct ServingConfig {
    /// Request JSON file, or `-` to read stdin
    #[arg(long, short, default_value = "-")]
    pub request: String,

    /// TensorFlow Serving REST endpoint
    #[arg(long, env = "MODEL_ENDPOINT", default_value = "http://localhost:8501")]
    pub model_endpoint: String,

    /// Served model name
    #[arg(long, env = "MODEL_NAME", default_value = "default")]
    pub model_name: String,

    /// Cloud Storage JSON API endpoint
    #[arg(long, env = "GCS_ENDPOINT", default_value = DEFAULT_GCS_ENDPOINT)]
    pub gcs_endpoint: String,

    /// Timeout for each storage fetch and model call
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,
}

impl ServingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Predictor backed by Cloud Storage and PNG example conversion
    pub fn build_predictor(&self) -> Result<Predictor, FetchError> {
        let fetcher = GcsFetcher::with_timeout(self.gcs_endpoint.clone(), self.timeout())?;
        Predictor::builder()
            .fetcher(fetcher)
            .credentials(BearerCredentialFactory)
            .converter(PngExampleConverter)
            .build()
    }

    pub fn build_model_runner(&self) -> Result<RestModelRunner, ModelError> {
        RestModelRunner::with_timeout(&self.model_endpoint, &self.model_name, self.timeout())
    }

    pub fn reads_stdin(&self) -> bool {
        self.request == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_and_timeout() {
        let config = ServingConfig::try_parse_from([
            "derm-serving",
            "--request",
            "request.json",
            "--timeout-secs",
            "5",
            "--pretty",
        ])
        .unwrap();

        assert_eq!(config.request, "request.json");
        assert!(!config.reads_stdin());
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.pretty);
    }

    #[test]
    fn test_explicit_endpoints() {
        let config = ServingConfig::try_parse_from([
            "derm-serving",
            "--model-endpoint",
            "http://model:8501",
            "--model-name",
            "derm",
            "--gcs-endpoint",
            "http://localhost:4443",
        ])
        .unwrap();

        assert!(config.reads_stdin());
        let runner = config.build_model_runner().unwrap();
        assert_eq!(runner.predict_url(), "http://model:8501/v1/models/derm:predict");
        assert!(config.build_predictor().is_ok());
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        let result =
            ServingConfig::try_parse_from(["derm-serving", "--timeout-secs", "soon"]);
        assert!(result.is_err());
    }
}
