//! Fraud Detection API - Main Entry Point
//!
//! Loads the classifier and decision threshold, then serves predictions
//! over HTTP.

use anyhow::Result;
use fraud_detection_api::{config::AppConfig, startup::Application};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fraud_detection_api=info".parse()?),
        )
        .init();

    info!("Starting Fraud Detection API");

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        model = %config.model.model_path,
        threshold = %config.model.threshold_path,
        "Configuration loaded successfully"
    );

    // Artifact loading happens here; failure is fatal before serving
    let app = Application::build(config).await?;
    info!(port = app.port(), "Fraud Detection API is running");

    app.run_until_stopped().await?;

    Ok(())
}
