//! Request payload validation

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// JSON extractor that runs field validation after deserialization.
///
/// Deserialization failures (missing field, wrong type) surface the
/// deserializer's field-level message; range violations surface the
/// validator's per-field errors. Both reject before any inference runs.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| match e {
                JsonRejection::JsonDataError(err) => {
                    ApiError::UnprocessableEntity(err.body_text())
                }
                other => ApiError::BadRequest(other.body_text()),
            })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
