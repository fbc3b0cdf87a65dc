//! Prediction response data structures

use serde::{Deserialize, Serialize};

/// Round a value to four decimal places.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Outcome of scoring a single transaction.
///
/// Probability and threshold are reported at four decimal places;
/// `is_fraud` is derived from the reported values so the response is
/// self-consistent. Equality with the threshold classifies as fraud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Estimated probability of the fraud class, rounded to 4 decimals
    pub fraud_probability: f64,

    /// Decision threshold loaded at startup, rounded to 4 decimals
    pub fraud_threshold: f64,

    /// 1 if `fraud_probability >= fraud_threshold`, 0 otherwise
    pub is_fraud: u8,
}

impl PredictionResult {
    /// Build a result from a raw probability and the decision threshold.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        let fraud_probability = round4(probability);
        let fraud_threshold = round4(threshold);

        Self {
            fraud_probability,
            fraud_threshold,
            is_fraud: u8::from(fraud_probability >= fraud_threshold),
        }
    }
}
