use serde_json::{Map, Value};

use crate::domain::errors::ValidationError;
use crate::domain::features::{ContractLength, CustomerFeatures, Gender, SubscriptionType};

const AGE_MIN: i64 = 0;
const AGE_MAX: i64 = 120;

/// Schema validator for raw prediction requests.
///
/// Converts the loosely-typed map a form or JSON body delivers into a
/// fully-populated [`CustomerFeatures`], or rejects it with one error per
/// violated field. Pure: no logging, no side effects.
pub struct FeatureValidator;

impl FeatureValidator {
    pub fn validate(input: &Map<String, Value>) -> Result<CustomerFeatures, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let age = Self::int_in_range(input, "age", AGE_MIN, AGE_MAX, &mut errors);
        let gender = Self::enum_field(input, "gender", Gender::ALLOWED, Gender::parse, &mut errors);
        let tenure_months = Self::non_negative_int(input, "tenure_months", &mut errors);
        let usage_frequency = Self::non_negative_int(input, "usage_frequency", &mut errors);
        let support_calls = Self::non_negative_int(input, "support_calls", &mut errors);
        let payment_delay_days = Self::non_negative_int(input, "payment_delay_days", &mut errors);
        let subscription_type = Self::enum_field(
            input,
            "subscription_type",
            SubscriptionType::ALLOWED,
            SubscriptionType::parse,
            &mut errors,
        );
        let contract_length = Self::enum_field(
            input,
            "contract_length",
            ContractLength::ALLOWED,
            ContractLength::parse,
            &mut errors,
        );
        let total_spend = Self::non_negative_float(input, "total_spend", &mut errors);
        let last_interaction_days =
            Self::non_negative_int(input, "last_interaction_days", &mut errors);

        // Every helper returns None exactly when it pushed an error, so a
        // full tuple of Some implies errors is empty.
        if let (
            Some(age),
            Some(gender),
            Some(tenure_months),
            Some(usage_frequency),
            Some(support_calls),
            Some(payment_delay_days),
            Some(subscription_type),
            Some(contract_length),
            Some(total_spend),
            Some(last_interaction_days),
        ) = (
            age,
            gender,
            tenure_months,
            usage_frequency,
            support_calls,
            payment_delay_days,
            subscription_type,
            contract_length,
            total_spend,
            last_interaction_days,
        ) {
            Ok(CustomerFeatures {
                age,
                gender,
                tenure_months,
                usage_frequency,
                support_calls,
                payment_delay_days,
                subscription_type,
                contract_length,
                total_spend,
                last_interaction_days,
            })
        } else {
            Err(errors)
        }
    }

    /// Integer coercion: JSON integers, whole-valued floats, and numeric
    /// strings (form front ends submit everything as text). Coerces into
    /// i128 so the full u64 range survives; width checks are per field.
    fn coerce_int(value: &Value) -> Option<i128> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.is_finite() && f.fract() == 0.0)
                        .map(|f| f as i128)
                }),
            Value::String(s) => s.trim().parse::<i128>().ok(),
            _ => None,
        }
    }

    fn coerce_float(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    fn int_in_range(
        input: &Map<String, Value>,
        field: &'static str,
        min: i64,
        max: i64,
        errors: &mut Vec<ValidationError>,
    ) -> Option<u32> {
        let Some(raw) = input.get(field) else {
            errors.push(ValidationError::MissingField { field });
            return None;
        };
        let Some(n) = Self::coerce_int(raw) else {
            errors.push(ValidationError::TypeMismatch {
                field,
                expected: "an integer",
            });
            return None;
        };
        // try_from keeps the narrowing honest: anything outside u32 is out
        // of range by construction, never wrapped.
        match u32::try_from(n) {
            Ok(v) if i64::from(v) >= min && i64::from(v) <= max => Some(v),
            _ => {
                errors.push(ValidationError::OutOfRange { field, min, max });
                None
            }
        }
    }

    fn non_negative_int(
        input: &Map<String, Value>,
        field: &'static str,
        errors: &mut Vec<ValidationError>,
    ) -> Option<u64> {
        let Some(raw) = input.get(field) else {
            errors.push(ValidationError::MissingField { field });
            return None;
        };
        let Some(n) = Self::coerce_int(raw) else {
            errors.push(ValidationError::TypeMismatch {
                field,
                expected: "an integer",
            });
            return None;
        };
        if n < 0 {
            errors.push(ValidationError::BelowMinimum { field, min: 0 });
            return None;
        }
        match u64::try_from(n) {
            Ok(v) => Some(v),
            // whole-valued but wider than the record can represent
            Err(_) => {
                errors.push(ValidationError::TypeMismatch {
                    field,
                    expected: "an integer",
                });
                None
            }
        }
    }

    fn non_negative_float(
        input: &Map<String, Value>,
        field: &'static str,
        errors: &mut Vec<ValidationError>,
    ) -> Option<f64> {
        let Some(raw) = input.get(field) else {
            errors.push(ValidationError::MissingField { field });
            return None;
        };
        let Some(f) = Self::coerce_float(raw) else {
            errors.push(ValidationError::TypeMismatch {
                field,
                expected: "a number",
            });
            return None;
        };
        if f < 0.0 {
            errors.push(ValidationError::BelowMinimum { field, min: 0 });
            return None;
        }
        Some(f)
    }

    fn enum_field<T>(
        input: &Map<String, Value>,
        field: &'static str,
        allowed: &'static str,
        parse: fn(&str) -> Option<T>,
        errors: &mut Vec<ValidationError>,
    ) -> Option<T> {
        let Some(raw) = input.get(field) else {
            errors.push(ValidationError::MissingField { field });
            return None;
        };
        let Some(s) = raw.as_str() else {
            errors.push(ValidationError::TypeMismatch {
                field,
                expected: "a string",
            });
            return None;
        };
        match parse(s) {
            Some(value) => Some(value),
            None => {
                errors.push(ValidationError::NotInEnum { field, allowed });
                None
            }
        }
    }
}
