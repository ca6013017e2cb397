//! Churngate - customer churn prediction service
//!
//! Serves a pre-trained churn classifier behind a small HTTP API:
//! `POST /predict` takes the 10 customer attributes as JSON and returns
//! the binary churn verdict plus, when the backend is calibrated, the
//! churn probability.
//!
//! # Usage
//! ```sh
//! ORACLE_BACKEND=mock PORT=8000 cargo run
//! ```
//!
//! # Environment Variables
//! - `ORACLE_BACKEND` - mock | smartcore | onnx (default: mock)
//! - `MODEL_PATH` - path to the model artifact
//! - `HOST` / `PORT` - listen address (default: 0.0.0.0:8000)
//! - `CHURN_THRESHOLD` - decision threshold in [0, 1] (default: 0.5)

use anyhow::{Context, Result};
use churngate::application::gateway::PredictionGateway;
use churngate::config::{Config, OracleBackend};
use churngate::domain::ports::ChurnOracle;
use churngate::infrastructure::mock::MockChurnOracle;
use churngate::infrastructure::onnx_oracle::OnnxOracle;
use churngate::infrastructure::smartcore_oracle::SmartcoreOracle;
use churngate::interfaces::http::{AppState, router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup logging (stdout only)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Churngate {} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Backend={:?}, Model={:?}, Threshold={}",
        config.backend, config.model_path, config.churn_threshold
    );

    // Build the oracle once, before serving. A load failure here is
    // fatal: the service must not accept requests without a model.
    let oracle: Arc<dyn ChurnOracle> = match config.backend {
        OracleBackend::Mock => Arc::new(MockChurnOracle::new(config.churn_threshold)),
        OracleBackend::Smartcore => Arc::new(SmartcoreOracle::load(&config.model_path)?),
        OracleBackend::Onnx => Arc::new(OnnxOracle::load(
            &config.model_path,
            config.churn_threshold,
        )?),
    };
    info!("Oracle ready: {} ({})", oracle.name(), oracle.version());

    let gateway = Arc::new(PredictionGateway::new(oracle));
    let app = router(AppState { gateway });

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}. Press Ctrl+C to shutdown.", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Shutdown signal received. Exiting...");
}
