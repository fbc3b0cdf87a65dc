//! Fraud Detection API Library
//!
//! Serves a pre-trained fraud classifier over HTTP: seven transaction
//! features in, fraud probability and thresholded decision out. The
//! model and threshold artifacts are loaded once at startup and shared
//! read-only across requests.

pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod models;
pub mod routes;
pub mod startup;
pub mod types;
pub mod validation;

pub use config::AppConfig;
pub use error::ApiError;
pub use feature_extractor::FeatureExtractor;
pub use models::inference::{FraudScorer, OnnxScorer, PredictionService};
pub use routes::AppState;
pub use startup::Application;
pub use types::{prediction::PredictionResult, transaction::Transaction};
