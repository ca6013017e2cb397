use std::sync::Arc;

use tracing::error;

use crate::domain::errors::InferenceError;
use crate::domain::feature_registry;
use crate::domain::features::CustomerFeatures;
use crate::domain::ports::ChurnOracle;
use crate::domain::prediction::PredictionResult;

/// Mediates between validated customer records and the oracle's native
/// call signature.
///
/// Stateless per request; the oracle handle is the only shared state and
/// is read-only for the process lifetime. Oracle failures are logged with
/// full detail here and surfaced to callers as a generic
/// [`InferenceError`] only.
pub struct PredictionGateway {
    oracle: Arc<dyn ChurnOracle>,
}

impl PredictionGateway {
    pub fn new(oracle: Arc<dyn ChurnOracle>) -> Self {
        Self { oracle }
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    pub fn oracle_version(&self) -> &str {
        self.oracle.version()
    }

    /// Single synchronous inference attempt. No retries: a failure is
    /// terminal for this request only.
    pub fn predict(&self, features: &CustomerFeatures) -> Result<PredictionResult, InferenceError> {
        let row = feature_registry::encode(features);

        let (label, probability) = self.oracle.infer(&row).map_err(|e| {
            error!(
                oracle = self.oracle.name(),
                version = self.oracle.version(),
                error = %e,
                "oracle inference failed"
            );
            InferenceError
        })?;

        Ok(PredictionResult {
            label,
            churn_probability: probability.map(|p| p.clamp(0.0, 1.0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::OracleError;
    use crate::domain::features::{ContractLength, Gender, SubscriptionType};
    use crate::domain::prediction::ChurnLabel;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Shared in-memory sink for capturing log output in tests.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    struct FixedOracle {
        label: ChurnLabel,
        proba: Option<f64>,
    }

    impl ChurnOracle for FixedOracle {
        fn predict(&self, _row: &[f64]) -> Result<ChurnLabel, OracleError> {
            Ok(self.label)
        }

        fn predict_proba(&self, _row: &[f64]) -> Option<Result<f64, OracleError>> {
            self.proba.map(Ok)
        }

        fn name(&self) -> &str {
            "fixed"
        }

        fn version(&self) -> &str {
            "test"
        }
    }

    struct FailingOracle;

    impl ChurnOracle for FailingOracle {
        fn predict(&self, _row: &[f64]) -> Result<ChurnLabel, OracleError> {
            Err(OracleError::Backend("tree 17 index out of bounds".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn version(&self) -> &str {
            "test"
        }
    }

    fn sample() -> CustomerFeatures {
        CustomerFeatures {
            age: 35,
            gender: Gender::Male,
            tenure_months: 24,
            usage_frequency: 15,
            support_calls: 3,
            payment_delay_days: 10,
            subscription_type: SubscriptionType::Premium,
            contract_length: ContractLength::Annual,
            total_spend: 750.0,
            last_interaction_days: 15,
        }
    }

    #[test]
    fn test_result_carries_probability_when_oracle_is_calibrated() {
        let gateway = PredictionGateway::new(Arc::new(FixedOracle {
            label: ChurnLabel::Churn,
            proba: Some(0.83),
        }));
        let result = gateway.predict(&sample()).unwrap();
        assert_eq!(result.label, ChurnLabel::Churn);
        assert_eq!(result.churn_probability, Some(0.83));
    }

    #[test]
    fn test_probability_is_omitted_for_label_only_oracles() {
        let gateway = PredictionGateway::new(Arc::new(FixedOracle {
            label: ChurnLabel::Stay,
            proba: None,
        }));
        let result = gateway.predict(&sample()).unwrap();
        assert_eq!(result.label, ChurnLabel::Stay);
        assert_eq!(result.churn_probability, None);
    }

    #[test]
    fn test_consecutive_invocations_are_identical() {
        let gateway = PredictionGateway::new(Arc::new(FixedOracle {
            label: ChurnLabel::Churn,
            proba: Some(0.71),
        }));
        let first = gateway.predict(&sample()).unwrap();
        let second = gateway.predict(&sample()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_oracle_failure_surfaces_without_internal_detail() {
        let gateway = PredictionGateway::new(Arc::new(FailingOracle));
        let err = gateway.predict(&sample()).unwrap_err();
        let msg = err.to_string();
        assert!(!msg.contains("tree 17"));
        assert_eq!(msg, "churn inference failed");
    }

    #[test]
    fn test_oracle_failure_leaves_a_diagnostic_log_entry() {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .finish();

        let gateway = PredictionGateway::new(Arc::new(FailingOracle));
        let err =
            tracing::subscriber::with_default(subscriber, || gateway.predict(&sample()))
                .unwrap_err();
        assert_eq!(err.to_string(), "churn inference failed");

        // The detail withheld from the client must land in the log.
        let logs = buffer.contents();
        assert!(logs.contains("ERROR"), "no error entry: {logs}");
        assert!(
            logs.contains("tree 17 index out of bounds"),
            "missing backend detail: {logs}"
        );
    }

    /// Oracle counting how many inference passes it runs, with an
    /// `infer` override in the style of the single-pass backends.
    struct SinglePassOracle {
        runs: AtomicUsize,
    }

    impl ChurnOracle for SinglePassOracle {
        fn predict(&self, _row: &[f64]) -> Result<ChurnLabel, OracleError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(ChurnLabel::Stay)
        }

        fn predict_proba(&self, _row: &[f64]) -> Option<Result<f64, OracleError>> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Some(Ok(0.1))
        }

        fn infer(&self, _row: &[f64]) -> Result<(ChurnLabel, Option<f64>), OracleError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok((ChurnLabel::Churn, Some(0.9)))
        }

        fn name(&self) -> &str {
            "single-pass"
        }

        fn version(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_gateway_runs_one_inference_pass_per_request() {
        let oracle = Arc::new(SinglePassOracle {
            runs: AtomicUsize::new(0),
        });
        let gateway = PredictionGateway::new(oracle.clone());

        let result = gateway.predict(&sample()).unwrap();
        assert_eq!(result.label, ChurnLabel::Churn);
        assert_eq!(result.churn_probability, Some(0.9));
        assert_eq!(oracle.runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_out_of_range_probability_is_clamped() {
        let gateway = PredictionGateway::new(Arc::new(FixedOracle {
            label: ChurnLabel::Churn,
            proba: Some(1.2),
        }));
        let result = gateway.predict(&sample()).unwrap();
        assert_eq!(result.churn_probability, Some(1.0));
    }
}
