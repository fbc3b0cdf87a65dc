//! HTTP route handlers

use crate::error::ApiError;
use crate::models::inference::PredictionService;
use crate::types::prediction::PredictionResult;
use crate::types::transaction::Transaction;
use crate::validation::ValidatedJson;
use axum::extract::State;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

/// Liveness endpoint. Carries no model dependency.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Fraud Detection API is running" }))
}

/// Score a transaction against the loaded model and threshold.
pub async fn predict(
    State(state): State<AppState>,
    ValidatedJson(transaction): ValidatedJson<Transaction>,
) -> Result<Json<PredictionResult>, ApiError> {
    let result = state.service.predict(&transaction)?;
    Ok(Json(result))
}
