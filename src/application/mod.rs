// Prediction gateway between validated input and the oracle
pub mod gateway;
