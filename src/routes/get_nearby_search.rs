use axum::{extract::State, response::Response};
#[cfg(test)]
use axum_macros::debug_handler;
use serde::Deserialize;
use validator::Validate;

use super::forward;
use crate::{
    services::places_client::legacy_places_service::{QueryParams, NEARBY_SEARCH_PATH},
    types::app_state::AppState,
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};

#[derive(Validate, Deserialize)]
pub struct GetNearbySearchPayload {
    #[validate(length(min = 3, message = "Must be a lat,lng pair"))]
    pub location: String,

    #[serde(flatten)]
    pub params: QueryParams,
}

#[cfg_attr(test, debug_handler)]
pub async fn get_nearby_search(
    State(state): State<AppState>,
    ValidatedQuery(GetNearbySearchPayload {
        location,
        mut params,
    }): ValidatedQuery<GetNearbySearchPayload>,
) -> Result<Response, AppError> {
    params.insert("location".to_string(), location);
    forward(&state, NEARBY_SEARCH_PATH, params).await
}
