//! Feature extraction for fraud model inference.
//!
//! Transforms an incoming transaction into the feature vector the
//! classifier was trained on. The ONNX artifact does not carry feature
//! names, so the order encoded here must match the training column order.

use crate::types::transaction::Transaction;

/// Feature extractor that transforms transactions into model input features.
///
/// Features are extracted in the exact order expected by the ONNX model.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract features from a transaction.
    ///
    /// Returns a feature vector matching the training data format
    /// (7 features). Order matches the training column order.
    pub fn extract(&self, tx: &Transaction) -> Vec<f32> {
        let mut features = Vec::with_capacity(7);

        features.push(tx.distance_from_home as f32);
        features.push(tx.distance_from_last_transaction as f32);
        features.push(tx.ratio_to_median_purchase_price as f32);
        features.push(tx.repeat_retailer as f32);
        features.push(tx.used_chip as f32);
        features.push(tx.used_pin_number as f32);
        features.push(tx.online_order as f32);

        features
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        7
    }

    /// Get feature names in extraction order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec![
            "distance_from_home",
            "distance_from_last_transaction",
            "ratio_to_median_purchase_price",
            "repeat_retailer",
            "used_chip",
            "used_pin_number",
            "online_order",
        ]
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
