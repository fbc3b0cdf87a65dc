//! Transaction data structures for fraud detection

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A card transaction to be scored for fraud.
///
/// Field names match the training data columns; the binary flags are
/// 0/1 integers on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Transaction {
    /// Distance from the cardholder's home to the transaction location
    pub distance_from_home: f64,

    /// Distance from the location of the previous transaction
    pub distance_from_last_transaction: f64,

    /// Purchase amount relative to the cardholder's median purchase
    pub ratio_to_median_purchase_price: f64,

    /// Whether the retailer has been used before (0/1)
    #[validate(range(min = 0, max = 1, message = "must be 0 or 1"))]
    pub repeat_retailer: i64,

    /// Whether the card chip was used (0/1)
    #[validate(range(min = 0, max = 1, message = "must be 0 or 1"))]
    pub used_chip: i64,

    /// Whether the PIN was entered (0/1)
    #[validate(range(min = 0, max = 1, message = "must be 0 or 1"))]
    pub used_pin_number: i64,

    /// Whether the order was placed online (0/1)
    #[validate(range(min = 0, max = 1, message = "must be 0 or 1"))]
    pub online_order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            distance_from_home: 57.8,
            distance_from_last_transaction: 0.3,
            ratio_to_median_purchase_price: 1.9,
            repeat_retailer: 1,
            used_chip: 1,
            used_pin_number: 0,
            online_order: 1,
        }
    }

    #[test]
    fn test_transaction_serialization() {
        let tx = sample();

        let json = serde_json::to_string(&tx).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();

        assert_eq!(tx.distance_from_home, deserialized.distance_from_home);
        assert_eq!(tx.online_order, deserialized.online_order);
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{
            "distance_from_home": 57.8,
            "distance_from_last_transaction": 0.3,
            "ratio_to_median_purchase_price": 1.9,
            "repeat_retailer": 1,
            "used_chip": 1,
            "used_pin_number": 0
        }"#;

        let result = serde_json::from_str::<Transaction>(json);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("online_order"));
    }

    #[test]
    fn test_non_numeric_field_rejected() {
        let json = r#"{
            "distance_from_home": "far",
            "distance_from_last_transaction": 0.3,
            "ratio_to_median_purchase_price": 1.9,
            "repeat_retailer": 1,
            "used_chip": 1,
            "used_pin_number": 0,
            "online_order": 1
        }"#;

        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_flag_out_of_range_rejected() {
        let mut tx = sample();
        tx.used_chip = 2;
        assert!(tx.validate().is_err());

        tx.used_chip = -1;
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_valid_flags_accepted() {
        assert!(sample().validate().is_ok());
    }
}
