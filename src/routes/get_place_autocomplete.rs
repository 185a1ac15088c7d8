use axum::{extract::State, response::Response};
#[cfg(test)]
use axum_macros::debug_handler;
use serde::Deserialize;
use validator::Validate;

use super::forward;
use crate::{
    services::places_client::legacy_places_service::{QueryParams, AUTOCOMPLETE_PATH},
    types::app_state::AppState,
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};

#[derive(Validate, Deserialize)]
pub struct GetPlaceAutocompletePayload {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub input: String,

    #[serde(flatten)]
    pub params: QueryParams,
}

#[cfg_attr(test, debug_handler)]
pub async fn get_place_autocomplete(
    State(state): State<AppState>,
    ValidatedQuery(GetPlaceAutocompletePayload { input, mut params }): ValidatedQuery<
        GetPlaceAutocompletePayload,
    >,
) -> Result<Response, AppError> {
    params.insert("input".to_string(), input);
    forward(&state, AUTOCOMPLETE_PATH, params).await
}
