use serde::Serialize;

/// Customer gender as represented in the training data.
///
/// Parsing is case-sensitive: the model artifact only knows the exact
/// literals it was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALLOWED: &'static str = "Male, Female";

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Training-time label code (alphabetical level order).
    pub(crate) fn encoded(&self) -> f64 {
        match self {
            Gender::Female => 0.0,
            Gender::Male => 1.0,
        }
    }
}

/// Subscription tier of the customer's plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubscriptionType {
    Basic,
    Standard,
    Premium,
}

impl SubscriptionType {
    pub const ALLOWED: &'static str = "Basic, Standard, Premium";

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Basic" => Some(SubscriptionType::Basic),
            "Standard" => Some(SubscriptionType::Standard),
            "Premium" => Some(SubscriptionType::Premium),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Basic => "Basic",
            SubscriptionType::Standard => "Standard",
            SubscriptionType::Premium => "Premium",
        }
    }

    /// Training-time label code (alphabetical level order).
    pub(crate) fn encoded(&self) -> f64 {
        match self {
            SubscriptionType::Basic => 0.0,
            SubscriptionType::Premium => 1.0,
            SubscriptionType::Standard => 2.0,
        }
    }
}

/// Billing contract duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContractLength {
    Monthly,
    Quarterly,
    Annual,
}

impl ContractLength {
    pub const ALLOWED: &'static str = "Monthly, Quarterly, Annual";

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Monthly" => Some(ContractLength::Monthly),
            "Quarterly" => Some(ContractLength::Quarterly),
            "Annual" => Some(ContractLength::Annual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractLength::Monthly => "Monthly",
            ContractLength::Quarterly => "Quarterly",
            ContractLength::Annual => "Annual",
        }
    }

    /// Training-time label code (alphabetical level order).
    pub(crate) fn encoded(&self) -> f64 {
        match self {
            ContractLength::Annual => 0.0,
            ContractLength::Monthly => 1.0,
            ContractLength::Quarterly => 2.0,
        }
    }
}

/// Fully-typed customer record, the only shape the gateway accepts.
///
/// Constructed exclusively by the validator; a partially-filled record
/// cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerFeatures {
    pub age: u32,
    pub gender: Gender,
    pub tenure_months: u64,
    pub usage_frequency: u64,
    pub support_calls: u64,
    pub payment_delay_days: u64,
    pub subscription_type: SubscriptionType,
    pub contract_length: ContractLength,
    pub total_spend: f64,
    pub last_interaction_days: u64,
}
