use crate::domain::features::CustomerFeatures;

/// Wire field name paired with the model's training-time column header.
///
/// This order MUST match exactly the column order the model artifact was
/// trained with. Any change here silently misaligns predictions. The
/// column headers are pinned to the artifact's schema (space-separated,
/// capitalized), not derived mechanically from the wire names.
pub const COLUMNS: &[(&str, &str)] = &[
    ("age", "Age"),
    ("gender", "Gender"),
    ("tenure_months", "Tenure"),
    ("usage_frequency", "Usage Frequency"),
    ("support_calls", "Support Calls"),
    ("payment_delay_days", "Payment Delay"),
    ("subscription_type", "Subscription Type"),
    ("contract_length", "Contract Length"),
    ("total_spend", "Total Spend"),
    ("last_interaction_days", "Last Interaction"),
];

pub const FEATURE_COUNT: usize = COLUMNS.len();

// Positional indices into the encoded row.
pub const IDX_AGE: usize = 0;
pub const IDX_GENDER: usize = 1;
pub const IDX_TENURE: usize = 2;
pub const IDX_USAGE_FREQUENCY: usize = 3;
pub const IDX_SUPPORT_CALLS: usize = 4;
pub const IDX_PAYMENT_DELAY: usize = 5;
pub const IDX_SUBSCRIPTION_TYPE: usize = 6;
pub const IDX_CONTRACT_LENGTH: usize = 7;
pub const IDX_TOTAL_SPEND: usize = 8;
pub const IDX_LAST_INTERACTION: usize = 9;

/// Model column header for a wire field name.
pub fn model_column(wire_field: &str) -> Option<&'static str> {
    COLUMNS
        .iter()
        .find(|(wire, _)| *wire == wire_field)
        .map(|(_, column)| *column)
}

/// Wire field name for a model column header (inverse of [`model_column`]).
pub fn wire_field(column: &str) -> Option<&'static str> {
    COLUMNS
        .iter()
        .find(|(_, model)| *model == column)
        .map(|(wire, _)| *wire)
}

/// Encodes a validated record into the positional row the oracle
/// backends consume. Categorical levels use their training-time label
/// codes; numerics pass through as f64.
pub fn encode(features: &CustomerFeatures) -> [f64; FEATURE_COUNT] {
    [
        features.age as f64,
        features.gender.encoded(),
        features.tenure_months as f64,
        features.usage_frequency as f64,
        features.support_calls as f64,
        features.payment_delay_days as f64,
        features.subscription_type.encoded(),
        features.contract_length.encoded(),
        features.total_spend,
        features.last_interaction_days as f64,
    ]
}
