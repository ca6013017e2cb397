use thiserror::Error;

/// Errors raised while validating a raw input map against the feature
/// schema. Each variant names the offending field; none of these ever
/// reach the oracle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` must be {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` must be one of: {allowed}")]
    NotInEnum {
        field: &'static str,
        allowed: &'static str,
    },

    #[error("field `{field}` must be at least {min}")]
    BelowMinimum { field: &'static str, min: i64 },

    #[error("field `{field}` must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

impl ValidationError {
    /// The wire field this error is about.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::NotInEnum { field, .. }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

/// Failures raised by an oracle backend during inference. These carry
/// backend detail and are logged server-side only, never serialized to
/// clients.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("feature row shape mismatch: got {got}, expected {expected}")]
    ShapeMismatch { got: usize, expected: usize },

    #[error("model produced no output")]
    EmptyOutput,

    #[error("backend failure: {0}")]
    Backend(String),
}

/// Client-facing inference failure. Intentionally carries no internal
/// detail; diagnostics go to the log at the gateway boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("churn inference failed")]
pub struct InferenceError;

/// The oracle could not be initialized at startup. Fatal: the service
/// must not begin accepting requests in this state.
#[derive(Debug, Error)]
#[error("oracle failed to initialize: {reason}")]
pub struct OracleUnavailable {
    pub reason: String,
}
