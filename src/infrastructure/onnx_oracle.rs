use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use tracing::info;

use crate::domain::errors::{OracleError, OracleUnavailable};
use crate::domain::feature_registry::FEATURE_COUNT;
use crate::domain::ports::ChurnOracle;
use crate::domain::prediction::ChurnLabel;

/// ONNX Runtime backend for a churn classifier exported with class
/// probabilities as its output tensor (`[1, 2]`, stay mass at index 0,
/// churn mass at index 1).
///
/// `Session::run` needs exclusive access, so inference is serialized
/// behind a mutex; the session itself is loaded once and never reloaded.
#[derive(Debug)]
pub struct OnnxOracle {
    session: Mutex<Session>,
    threshold: f64,
}

impl OnnxOracle {
    pub fn load(model_path: &Path, threshold: f64) -> Result<Self, OracleUnavailable> {
        if !model_path.exists() {
            return Err(OracleUnavailable {
                reason: format!("model file not found at {:?}", model_path),
            });
        }

        let session = Session::builder()
            .and_then(|mut builder| builder.commit_from_file(model_path))
            .map_err(|e| OracleUnavailable {
                reason: format!("cannot load ONNX model {:?}: {}", model_path, e),
            })?;

        info!("Loaded ONNX churn model from {:?}", model_path);
        Ok(Self {
            session: Mutex::new(session),
            threshold,
        })
    }

    /// Runs the session and extracts the churn-class probability mass.
    fn churn_probability(&self, row: &[f64]) -> Result<f64, OracleError> {
        if row.len() != FEATURE_COUNT {
            return Err(OracleError::ShapeMismatch {
                got: row.len(),
                expected: FEATURE_COUNT,
            });
        }

        let data: Vec<f32> = row.iter().map(|v| *v as f32).collect();
        let shape = vec![1usize, FEATURE_COUNT];
        let input_value = ort::value::Value::from_array((shape.as_slice(), data))
            .map_err(|e| OracleError::Backend(format!("input value creation failed: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| OracleError::Backend(format!("session lock poisoned: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_value])
            .map_err(|e| OracleError::Backend(format!("session run failed: {}", e)))?;

        let output_value = outputs
            .iter()
            .next()
            .map(|(_, v)| v)
            .ok_or(OracleError::EmptyOutput)?;
        let (_, probabilities) = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| OracleError::Backend(format!("output extraction failed: {}", e)))?;

        match probabilities {
            [_, churn, ..] => Ok(f64::from(*churn)),
            [single] => Ok(f64::from(*single)),
            [] => Err(OracleError::EmptyOutput),
        }
    }
}

impl ChurnOracle for OnnxOracle {
    fn predict(&self, row: &[f64]) -> Result<ChurnLabel, OracleError> {
        let p = self.churn_probability(row)?;
        Ok(ChurnLabel::from_score(p, self.threshold))
    }

    fn predict_proba(&self, row: &[f64]) -> Option<Result<f64, OracleError>> {
        Some(self.churn_probability(row))
    }

    // Both outputs come from the same tensor; run the session once.
    fn infer(&self, row: &[f64]) -> Result<(ChurnLabel, Option<f64>), OracleError> {
        let p = self.churn_probability(row)?;
        Ok((ChurnLabel::from_score(p, self.threshold), Some(p)))
    }

    fn name(&self) -> &str {
        "ONNX Runtime"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_model_file_is_fatal() {
        let err = OnnxOracle::load(&PathBuf::from("non_existent.onnx"), 0.5).unwrap_err();
        assert!(err.reason.contains("non_existent.onnx"));
    }
}
