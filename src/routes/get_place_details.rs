use axum::{extract::State, response::Response};
#[cfg(test)]
use axum_macros::debug_handler;
use serde::Deserialize;
use validator::Validate;

use super::forward;
use crate::{
    services::places_client::legacy_places_service::{QueryParams, DETAILS_PATH},
    types::app_state::AppState,
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};

#[derive(Validate, Deserialize)]
pub struct GetPlaceDetailsPayload {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub placeid: String,

    #[serde(flatten)]
    pub params: QueryParams,
}

#[cfg_attr(test, debug_handler)]
pub async fn get_place_details(
    State(state): State<AppState>,
    ValidatedQuery(GetPlaceDetailsPayload { placeid, mut params }): ValidatedQuery<
        GetPlaceDetailsPayload,
    >,
) -> Result<Response, AppError> {
    params.insert("placeid".to_string(), placeid);
    forward(&state, DETAILS_PATH, params).await
}
