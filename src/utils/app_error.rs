use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::places_client::types::places_service_error::PlacesServiceError;

#[derive(Debug)]
pub struct AppError {
    pub code: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(code: StatusCode, message: &str) -> Self {
        AppError {
            code,
            message: message.to_string(),
        }
    }
}

impl From<PlacesServiceError> for AppError {
    fn from(e: PlacesServiceError) -> Self {
        match e {
            PlacesServiceError::Timeout => {
                AppError::new(StatusCode::GATEWAY_TIMEOUT, "Upstream request timed out")
            }
            PlacesServiceError::Transport(_) | PlacesServiceError::Internal(_) => {
                AppError::new(StatusCode::BAD_GATEWAY, "Upstream request failed")
            }
            PlacesServiceError::Api(message) => AppError::new(StatusCode::BAD_GATEWAY, &message),
            PlacesServiceError::NotFound(_) => AppError::new(StatusCode::NOT_FOUND, "Not found"),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ResponseJson {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response<Body> {
        (
            self.code,
            Json(ResponseJson {
                message: self.message,
            }),
        )
            .into_response()
    }
}
