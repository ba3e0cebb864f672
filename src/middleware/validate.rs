use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::{error::AppError, validation::RequestSchema};

/// JSON body checked against `T`'s schema before it is deserialized.
///
/// Rejections short-circuit the handler, so nothing reaches persistence.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: RequestSchema,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        T::schema(&payload).validate(&payload)?;

        let body = serde_json::from_value(payload)
            .map_err(|err| AppError::BadRequest(err.to_string()))?;
        Ok(ValidatedJson(body))
    }
}
