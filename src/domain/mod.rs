// Customer feature record and categorical levels
pub mod features;

// Ordered feature schema and column-name mapping
pub mod feature_registry;

// Prediction outcome types
pub mod prediction;

// Oracle port interface
pub mod ports;

// Input validation
pub mod validation;

// Domain-specific error types
pub mod errors;
