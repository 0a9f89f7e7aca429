mod error;
mod formatter;
mod resolver;


pub use error::{PredictionError, ResolutionError, RetrievalError, error_chain};
pub use formatter::{format_embedding, to_nested};
pub use resolver::InputResolver;

use ndarray::ArrayD;
use tracing::{debug, error, info, warn};

use crate::example::{ExampleConverter, PngExampleConverter};
use crate::gcs::{
    BearerCredentialFactory, CredentialFactory, DEFAULT_GCS_ENDPOINT, FetchError, GcsFetcher,
    ObjectFetcher,
};
use crate::model::{EMBEDDING_OUTPUT_KEY, ModelRunner};
use crate::schema::{Instance, PredictionEntry, PredictionRequest, PredictionResponse};

/// Turns prediction requests into embedding responses, one entry per instance
pub struct Predictor {
    resolver: InputResolver,
}

/// Builder for wiring the collaborators a predictor resolves inputs with
pub struct PredictorBuilder {
    fetcher: Option<Box<dyn ObjectFetcher>>,
    credentials: Option<Box<dyn CredentialFactory>>,
    converter: Option<Box<dyn ExampleConverter>>,
}

impl PredictorBuilder {
    pub fn new() -> Self {
        Self {
            fetcher: None,
            credentials: None,
            converter: None,
        }
    }

    /// Set the remote object fetcher (default: `GcsFetcher`)
    pub fn fetcher(mut self, fetcher: impl ObjectFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Set the credential factory (default: `BearerCredentialFactory`)
    pub fn credentials(mut self, credentials: impl CredentialFactory + 'static) -> Self {
        self.credentials = Some(Box::new(credentials));
        self
    }

    /// Set the image converter (default: `PngExampleConverter`)
    pub fn converter(mut self, converter: impl ExampleConverter + 'static) -> Self {
        self.converter = Some(Box::new(converter));
        self
    }

    /// Fails only when the default `GcsFetcher` cannot build its HTTP client
    pub fn build(self) -> Result<Predictor, FetchError> {
        let fetcher: Box<dyn ObjectFetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(GcsFetcher::new(DEFAULT_GCS_ENDPOINT)?),
        };
        let credentials = self
            .credentials
            .unwrap_or_else(|| Box::new(BearerCredentialFactory));
        let converter = self
            .converter
            .unwrap_or_else(|| Box::new(PngExampleConverter));

        Ok(Predictor {
            resolver: InputResolver::new(fetcher, credentials, converter),
        })
    }
}

impl Default for PredictorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor {
    pub fn builder() -> PredictorBuilder {
        PredictorBuilder::new()
    }

    /// Run inference on every instance of the request.
    ///
    /// Never fails: each instance gets exactly one entry, in request order,
    /// and a failing instance only affects its own entry.
    pub fn predict(&self, request: &PredictionRequest, model: &dyn ModelRunner) -> PredictionResponse {
        let predictions = request
            .instances
            .iter()
            .enumerate()
            .map(|(index, instance)| self.predict_entry(index, instance, model))
            .collect();

        PredictionResponse { predictions }
    }

    fn predict_entry(
        &self,
        index: usize,
        instance: &Instance,
        model: &dyn ModelRunner,
    ) -> PredictionEntry {
        match self.predict_instance(instance, model) {
            Ok(embedding) => {
                let entry = format_embedding(&embedding);
                debug!(index, "Prepared response");
                entry
            }
            Err(err) => {
                match &err {
                    PredictionError::Resolution(cause) => {
                        warn!(index, error = %error_chain(cause), "Failed to get prediction for instance");
                    }
                    PredictionError::Internal(cause) => {
                        error!(index, error = %error_chain(cause), "Failed to get prediction for instance");
                    }
                }
                PredictionEntry::error(err.client_description())
            }
        }
    }

    fn predict_instance(
        &self,
        instance: &Instance,
        model: &dyn ModelRunner,
    ) -> Result<ArrayD<f32>, PredictionError> {
        let input = self.resolver.resolve(instance)?;
        let embedding = model.run(&input, EMBEDDING_OUTPUT_KEY)?;
        info!(shape = ?embedding.shape(), "Ran inference on model");
        Ok(embedding)
    }
}
