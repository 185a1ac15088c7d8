use std::{collections::BTreeMap, time::Duration};

use crate::{
    middlewares::auth::auth_middleware,
    routes::apply_routes,
    services::places_client::legacy_places_service::{LegacyPlacesConfig, LegacyPlacesService},
    types::app_state::AppState,
};
use axum::{http::Method, middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(20);

/// Builds the proxy. `places_host` is the Google host, e.g.
/// `https://maps.googleapis.com`; `api_key` never leaves the server.
pub fn gen_app(places_host: &str, api_key: &str, auth_key: Option<String>) -> Router {
    let cors_middleware = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let state = AppState {
        places_service: LegacyPlacesService::new(LegacyPlacesConfig {
            base_url: format!("{}/maps/api", places_host.trim_end_matches('/')),
            api_key: api_key.to_string(),
            timeout: UPSTREAM_TIMEOUT,
            headers: BTreeMap::new(),
        }),
        auth_key,
    };

    apply_routes(Router::new())
        .route("/", get(root))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(cors_middleware)
        .with_state(state)
}

async fn root() -> &'static str {
    "places proxy"
}
