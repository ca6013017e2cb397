use serde::Serialize;

/// Binary churn verdict. Serialized on the wire as 0 (stay) or 1 (churn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChurnLabel {
    Stay,
    Churn,
}

impl ChurnLabel {
    pub fn as_u8(&self) -> u8 {
        match self {
            ChurnLabel::Stay => 0,
            ChurnLabel::Churn => 1,
        }
    }

    /// Decision from a churn score against a threshold (score >= threshold
    /// implies churn).
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            ChurnLabel::Churn
        } else {
            ChurnLabel::Stay
        }
    }
}

/// Outcome of one gateway invocation.
///
/// `churn_probability` is the probability mass the oracle assigns to the
/// churn class. It is `None` for label-only backends; the gateway never
/// fabricates a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: ChurnLabel,
    pub churn_probability: Option<f64>,
}
