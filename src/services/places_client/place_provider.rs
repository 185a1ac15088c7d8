use std::sync::Arc;

use async_trait::async_trait;

use super::{
    legacy_places_service::{LegacyPlacesConfig, LegacyPlacesService},
    legacy_provider::{LegacyPlacesProvider, LegacyQueryOptions},
    migrated_places_service::{MigratedPlacesConfig, MigratedPlacesService},
    migrated_provider::{MigratedPlacesProvider, MigratedQueryOptions},
    types::places_service_error::PlacesServiceError,
};
use crate::{
    autocomplete::config::{AutocompleteConfig, PlacesApi},
    types::{lat_lng_location::LatLng, place_details::PlaceDetails, suggestion::Suggestion},
};

/// One upstream places API, already normalized to the component's shapes.
#[async_trait]
pub trait PlaceProvider: Send + Sync {
    async fn autocomplete(&self, text: &str) -> Result<Vec<Suggestion>, PlacesServiceError>;

    async fn search_nearby(&self, location: LatLng)
        -> Result<Vec<Suggestion>, PlacesServiceError>;

    /// A non-success upstream status comes back as
    /// [`PlacesServiceError::NotFound`].
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesServiceError>;
}

fn legacy_service(config: &AutocompleteConfig, api_key: String) -> LegacyPlacesService {
    LegacyPlacesService::new(LegacyPlacesConfig {
        base_url: config.request_base_url().to_string(),
        api_key,
        timeout: config.timeout(),
        headers: config.request_headers(),
    })
}

/// Resolves the configured API into the provider the component talks to.
pub fn provider_for(config: &AutocompleteConfig) -> Arc<dyn PlaceProvider> {
    match &config.api {
        PlacesApi::Legacy => Arc::new(LegacyPlacesProvider::new(
            legacy_service(config, config.query.key.clone()),
            LegacyQueryOptions::from(config),
        )),
        PlacesApi::Migrated(options) => Arc::new(MigratedPlacesProvider::new(
            MigratedPlacesService::new(MigratedPlacesConfig {
                base_url: options.base_url.clone(),
                api_key: options.api_key.clone(),
                timeout: config.timeout(),
                field_mask: options.field_mask.clone(),
            }),
            // Geocoding has no migrated counterpart; the migrated key is used
            // on the legacy geocode endpoint.
            legacy_service(config, options.api_key.clone()),
            MigratedQueryOptions::from(config),
        )),
    }
}
