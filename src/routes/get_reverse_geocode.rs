use axum::{extract::State, response::Response};
#[cfg(test)]
use axum_macros::debug_handler;
use serde::Deserialize;
use validator::Validate;

use super::forward;
use crate::{
    services::places_client::legacy_places_service::{QueryParams, REVERSE_GEOCODE_PATH},
    types::app_state::AppState,
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};

#[derive(Validate, Deserialize)]
pub struct GetReverseGeocodePayload {
    #[validate(length(min = 3, message = "Must be a lat,lng pair"))]
    pub latlng: String,

    #[serde(flatten)]
    pub params: QueryParams,
}

#[cfg_attr(test, debug_handler)]
pub async fn get_reverse_geocode(
    State(state): State<AppState>,
    ValidatedQuery(GetReverseGeocodePayload { latlng, mut params }): ValidatedQuery<
        GetReverseGeocodePayload,
    >,
) -> Result<Response, AppError> {
    params.insert("latlng".to_string(), latlng);
    forward(&state, REVERSE_GEOCODE_PATH, params).await
}
