use crate::domain::errors::OracleError;
use crate::domain::prediction::ChurnLabel;

/// Interface over pre-trained churn classifiers.
///
/// Implementations are immutable after load and shared across requests.
/// A backend that is not safe for concurrent reads must serialize its own
/// inference call internally.
pub trait ChurnOracle: Send + Sync {
    /// Binary churn decision for one encoded feature row
    /// (order per [`crate::domain::feature_registry::COLUMNS`]).
    fn predict(&self, row: &[f64]) -> Result<ChurnLabel, OracleError>;

    /// Probability mass assigned to the churn class, when the backend is
    /// calibrated. Label-only backends keep the default.
    fn predict_proba(&self, _row: &[f64]) -> Option<Result<f64, OracleError>> {
        None
    }

    /// One full inference pass: the decision plus the churn mass when the
    /// backend is calibrated. The default composes `predict` and
    /// `predict_proba`; backends where both come out of a single
    /// computation override this to run it once.
    fn infer(&self, row: &[f64]) -> Result<(ChurnLabel, Option<f64>), OracleError> {
        let label = self.predict(row)?;
        let probability = match self.predict_proba(row) {
            Some(Ok(p)) => Some(p),
            Some(Err(e)) => return Err(e),
            None => None,
        };
        Ok((label, probability))
    }

    /// Backend name, for logging and the health report.
    fn name(&self) -> &str;

    /// Backend version/id.
    fn version(&self) -> &str;
}
