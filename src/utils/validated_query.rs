use std::error::Error;

use axum::{
    async_trait,
    extract::{FromRequest, Query, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::app_error::AppError;

/// Query-string extractor that also runs `validator` rules.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request(req, state)
            .await
            .map_err(|e| match e.source() {
                Some(source) => AppError::new(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid query: {}", source).as_str(),
                ),
                None => AppError::new(StatusCode::BAD_REQUEST, e.body_text().as_str()),
            })?;

        data.validate().map_err(|e| {
            AppError::new(
                StatusCode::BAD_REQUEST,
                format!("Invalid query: {}", e).as_str(),
            )
        })?;

        Ok(ValidatedQuery(data))
    }
}
