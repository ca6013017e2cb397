//! Configuration module for Churngate.
//!
//! All configuration is loaded from environment variables (a `.env` file
//! is honored via dotenvy in the binary):
//! - `ORACLE_BACKEND` - `mock`, `smartcore`, or `onnx` (default: mock)
//! - `MODEL_PATH` - path to the model artifact (default: models/churn_forest.json)
//! - `HOST` / `PORT` - listen address (default: 0.0.0.0:8000)
//! - `CHURN_THRESHOLD` - churn decision threshold for score-producing
//!   backends, within [0, 1] (default: 0.5)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Which oracle backend serves predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleBackend {
    Mock,
    Smartcore,
    Onnx,
}

impl FromStr for OracleBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(OracleBackend::Mock),
            "smartcore" => Ok(OracleBackend::Smartcore),
            "onnx" => Ok(OracleBackend::Onnx),
            _ => anyhow::bail!(
                "Invalid ORACLE_BACKEND: {}. Must be 'mock', 'smartcore', or 'onnx'",
                s
            ),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: OracleBackend,
    pub model_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub churn_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let backend = env::var("ORACLE_BACKEND")
            .unwrap_or_else(|_| "mock".to_string())
            .parse()?;

        let model_path = env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("models/churn_forest.json"));

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("Invalid PORT")?;

        let churn_threshold = env::var("CHURN_THRESHOLD")
            .unwrap_or_else(|_| "0.5".to_string())
            .parse::<f64>()
            .context("Invalid CHURN_THRESHOLD")?;
        if !(0.0..=1.0).contains(&churn_threshold) {
            anyhow::bail!(
                "CHURN_THRESHOLD must be within [0, 1], got {}",
                churn_threshold
            );
        }

        Ok(Self {
            backend,
            model_path,
            host,
            port,
            churn_threshold,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!(
            "mock".parse::<OracleBackend>().unwrap(),
            OracleBackend::Mock
        );
        assert_eq!(
            "SMARTCORE".parse::<OracleBackend>().unwrap(),
            OracleBackend::Smartcore
        );
        assert_eq!(
            "onnx".parse::<OracleBackend>().unwrap(),
            OracleBackend::Onnx
        );
        assert!("tensorflow".parse::<OracleBackend>().is_err());
    }

    #[test]
    fn test_bind_addr_formatting() {
        let config = Config {
            backend: OracleBackend::Mock,
            model_path: PathBuf::from("models/churn_forest.json"),
            host: "127.0.0.1".to_string(),
            port: 9000,
            churn_threshold: 0.5,
        };
        assert_eq!(config.bind_addr().unwrap().port(), 9000);
    }
}
