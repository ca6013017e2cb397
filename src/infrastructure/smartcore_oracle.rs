use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::info;

use crate::domain::errors::{OracleError, OracleUnavailable};
use crate::domain::feature_registry::FEATURE_COUNT;
use crate::domain::ports::ChurnOracle;
use crate::domain::prediction::ChurnLabel;

/// Random-forest backend deserialized from a JSON-exported SmartCore
/// artifact. Label-only: the forest votes a class but exposes no
/// calibrated probability, so `predict_proba` keeps the trait default.
///
/// The fitted forest is immutable and safe for concurrent reads.
pub struct SmartcoreOracle {
    model: RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>,
}

impl SmartcoreOracle {
    pub fn load(model_path: &Path) -> Result<Self, OracleUnavailable> {
        let file = File::open(model_path).map_err(|e| OracleUnavailable {
            reason: format!("cannot open model file {:?}: {}", model_path, e),
        })?;

        let model = serde_json::from_reader(BufReader::new(file)).map_err(|e| OracleUnavailable {
            reason: format!("cannot deserialize model {:?}: {}", model_path, e),
        })?;

        info!("Loaded SmartCore churn model from {:?}", model_path);
        Ok(Self { model })
    }
}

impl ChurnOracle for SmartcoreOracle {
    fn predict(&self, row: &[f64]) -> Result<ChurnLabel, OracleError> {
        if row.len() != FEATURE_COUNT {
            return Err(OracleError::ShapeMismatch {
                got: row.len(),
                expected: FEATURE_COUNT,
            });
        }

        let matrix = DenseMatrix::from_2d_vec(&vec![row.to_vec()])
            .map_err(|e| OracleError::Backend(format!("matrix creation failed: {}", e)))?;

        let classes = self
            .model
            .predict(&matrix)
            .map_err(|e| OracleError::Backend(format!("forest predict failed: {}", e)))?;

        match classes.first().copied() {
            Some(1) => Ok(ChurnLabel::Churn),
            Some(_) => Ok(ChurnLabel::Stay),
            None => Err(OracleError::EmptyOutput),
        }
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}
