use anyhow::{Context, Result};
use clap::Parser;
use derm_serving::{PredictionRequest, ServingConfig};
use std::fs;
use std::io::{self, Read, Write};
use tracing::info;

fn main() -> Result<()> {
    derm_serving::init_tracing();
    let config = ServingConfig::parse();

    let raw = read_request(&config)?;
    let request: PredictionRequest =
        serde_json::from_str(&raw).context("Request is not a valid prediction request")?;
    info!(instances = request.instances.len(), "Loaded request");

    let predictor = config
        .build_predictor()
        .context("Failed to build storage client")?;
    let model = config
        .build_model_runner()
        .context("Failed to build model client")?;

    let response = predictor.predict(&request, &model);
    let failed = response.predictions.iter().filter(|p| p.is_error()).count();
    info!(
        predictions = response.predictions.len(),
        failed, "Prediction complete"
    );

    let body = if config.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{body}").context("Failed to write response")?;
    Ok(())
}

fn read_request(config: &ServingConfig) -> Result<String> {
    if config.reads_stdin() {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read request from stdin")?;
        Ok(raw)
    } else {
        fs::read_to_string(&config.request)
            .with_context(|| format!("Failed to read request file {}", config.request))
    }
}
