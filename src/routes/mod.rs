use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{debug, error};

use crate::{
    services::places_client::legacy_places_service::{
        QueryParams, AUTOCOMPLETE_PATH, DETAILS_PATH, NEARBY_SEARCH_PATH, REVERSE_GEOCODE_PATH,
    },
    types::app_state::AppState,
    utils::app_error::AppError,
};

mod get_nearby_search;
mod get_place_autocomplete;
mod get_place_details;
mod get_reverse_geocode;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    app.route(
        AUTOCOMPLETE_PATH,
        get(get_place_autocomplete::get_place_autocomplete),
    )
    .route(DETAILS_PATH, get(get_place_details::get_place_details))
    .route(
        NEARBY_SEARCH_PATH,
        get(get_nearby_search::get_nearby_search),
    )
    .route(
        REVERSE_GEOCODE_PATH,
        get(get_reverse_geocode::get_reverse_geocode),
    )
}

/// Sends the request upstream with the server's key and relays the body.
async fn forward(state: &AppState, path: &str, params: QueryParams) -> Result<Response, AppError> {
    debug!(path, "forwarding places request");

    let body = state
        .places_service
        .forward(path, params)
        .await
        .map_err(|e| {
            error!("Failed to forward {}: {}", path, e);
            AppError::from(e)
        })?;

    Ok((StatusCode::OK, Json(body)).into_response())
}
