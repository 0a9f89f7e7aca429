// Public API exports
pub mod config;
pub mod example;
pub mod gcs;
pub mod model;
pub mod predictor;
pub mod schema;

// Re-export main types for convenience
pub use config::ServingConfig;

pub use schema::{ErrorDetail, Instance, PredictionEntry, PredictionRequest, PredictionResponse};

pub use predictor::{
    InputResolver, PredictionError, Predictor, PredictorBuilder, ResolutionError, format_embedding,
};

pub use gcs::{BearerCredential, CredentialFactory, GcsFetcher, ObjectFetcher};

pub use example::{Example, ExampleConverter, PngExampleConverter};

pub use model::{EMBEDDING_OUTPUT_KEY, ModelError, ModelInput, ModelRunner, RestModelRunner};

/// Install the global tracing subscriber.
///
/// Filtering comes from `RUST_LOG`; output goes to stderr so stdout stays
/// free for the response JSON.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
