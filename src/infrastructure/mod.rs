// Deterministic oracle for mock mode and tests
pub mod mock;

// SmartCore random-forest backend (label only)
pub mod smartcore_oracle;

// ONNX Runtime backend (label + calibrated probability)
pub mod onnx_oracle;
