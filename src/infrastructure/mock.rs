use crate::domain::errors::OracleError;
use crate::domain::feature_registry::{
    FEATURE_COUNT, IDX_CONTRACT_LENGTH, IDX_LAST_INTERACTION, IDX_PAYMENT_DELAY,
    IDX_SUBSCRIPTION_TYPE, IDX_SUPPORT_CALLS, IDX_TENURE, IDX_TOTAL_SPEND, IDX_USAGE_FREQUENCY,
};
use crate::domain::ports::ChurnOracle;
use crate::domain::prediction::ChurnLabel;

// Label codes, per the registry's alphabetical encoding.
const CONTRACT_MONTHLY: f64 = 1.0;
const SUBSCRIPTION_BASIC: f64 = 0.0;

/// Deterministic rule-based oracle used in mock mode and tests.
///
/// Scores a row by counting known churn signals and normalizing to
/// [0, 1]. Calibrated in the loose sense: `predict_proba` exposes the
/// score, so the full gateway contract (label + probability) is
/// exercised without a model artifact.
pub struct MockChurnOracle {
    threshold: f64,
}

impl MockChurnOracle {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    fn risk_score(row: &[f64]) -> f64 {
        let mut points = 0.0;
        if row[IDX_SUPPORT_CALLS] >= 5.0 {
            points += 2.0;
        }
        if row[IDX_PAYMENT_DELAY] >= 14.0 {
            points += 2.0;
        }
        if row[IDX_CONTRACT_LENGTH] == CONTRACT_MONTHLY {
            points += 1.0;
        }
        if row[IDX_SUBSCRIPTION_TYPE] == SUBSCRIPTION_BASIC {
            points += 1.0;
        }
        if row[IDX_TENURE] < 12.0 {
            points += 1.0;
        }
        if row[IDX_USAGE_FREQUENCY] < 10.0 {
            points += 1.0;
        }
        if row[IDX_LAST_INTERACTION] > 30.0 {
            points += 1.0;
        }
        if row[IDX_TOTAL_SPEND] < 500.0 {
            points += 1.0;
        }
        points / 10.0
    }

    fn check_shape(row: &[f64]) -> Result<(), OracleError> {
        if row.len() != FEATURE_COUNT {
            return Err(OracleError::ShapeMismatch {
                got: row.len(),
                expected: FEATURE_COUNT,
            });
        }
        Ok(())
    }
}

impl Default for MockChurnOracle {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ChurnOracle for MockChurnOracle {
    fn predict(&self, row: &[f64]) -> Result<ChurnLabel, OracleError> {
        Self::check_shape(row)?;
        Ok(ChurnLabel::from_score(Self::risk_score(row), self.threshold))
    }

    fn predict_proba(&self, row: &[f64]) -> Option<Result<f64, OracleError>> {
        Some(Self::check_shape(row).map(|()| Self::risk_score(row)))
    }

    fn name(&self) -> &str {
        "Mock Rule-Based Scorer"
    }

    fn version(&self) -> &str {
        "v1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature_registry::encode;
    use crate::domain::features::{ContractLength, CustomerFeatures, Gender, SubscriptionType};

    fn high_risk_profile() -> CustomerFeatures {
        CustomerFeatures {
            age: 45,
            gender: Gender::Female,
            tenure_months: 6,
            usage_frequency: 5,
            support_calls: 8,
            payment_delay_days: 25,
            subscription_type: SubscriptionType::Basic,
            contract_length: ContractLength::Monthly,
            total_spend: 200.0,
            last_interaction_days: 45,
        }
    }

    fn low_risk_profile() -> CustomerFeatures {
        CustomerFeatures {
            age: 28,
            gender: Gender::Male,
            tenure_months: 36,
            usage_frequency: 20,
            support_calls: 1,
            payment_delay_days: 2,
            subscription_type: SubscriptionType::Premium,
            contract_length: ContractLength::Annual,
            total_spend: 1500.0,
            last_interaction_days: 5,
        }
    }

    #[test]
    fn test_high_risk_profile_predicts_churn() {
        let oracle = MockChurnOracle::default();
        let row = encode(&high_risk_profile());
        assert_eq!(oracle.predict(&row).unwrap(), ChurnLabel::Churn);
        let proba = oracle.predict_proba(&row).unwrap().unwrap();
        assert!(proba >= 0.5, "got {proba}");
    }

    #[test]
    fn test_low_risk_profile_predicts_stay() {
        let oracle = MockChurnOracle::default();
        let row = encode(&low_risk_profile());
        assert_eq!(oracle.predict(&row).unwrap(), ChurnLabel::Stay);
        let proba = oracle.predict_proba(&row).unwrap().unwrap();
        assert!(proba < 0.5, "got {proba}");
    }

    #[test]
    fn test_wrong_row_width_is_a_shape_mismatch() {
        let oracle = MockChurnOracle::default();
        let err = oracle.predict(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            OracleError::ShapeMismatch {
                got: 3,
                expected: FEATURE_COUNT,
            }
        ));
    }
}
