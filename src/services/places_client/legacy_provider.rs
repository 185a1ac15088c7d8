use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::{
    legacy_places_service::{LegacyPlacesService, QueryParams},
    place_provider::PlaceProvider,
    types::{
        legacy_places_response::{LegacyPlaceResult, LegacyPlaceResultsResponse},
        places_service_error::PlacesServiceError,
    },
};
use crate::{
    autocomplete::config::{AutocompleteConfig, NearbyPlacesApi},
    types::{lat_lng_location::LatLng, place_details::PlaceDetails, suggestion::Suggestion},
};

#[derive(Clone, Default)]
pub struct LegacyQueryOptions {
    pub country_code: Option<String>,
    pub language: Option<String>,
    pub types: Option<String>,
    pub query: QueryParams,
    pub details_query: QueryParams,
    pub nearby_search_query: QueryParams,
    pub reverse_geocoding_query: QueryParams,
    pub nearby_places_api: NearbyPlacesApi,
    pub filter_reverse_geocoding_by_types: Vec<String>,
}

impl From<&AutocompleteConfig> for LegacyQueryOptions {
    fn from(config: &AutocompleteConfig) -> Self {
        LegacyQueryOptions {
            country_code: config.country_code.clone(),
            language: config.query.language.clone(),
            types: config.query.types.clone(),
            query: config.query.extra.clone(),
            details_query: config.details_query.clone(),
            nearby_search_query: config.nearby_search_query.clone(),
            reverse_geocoding_query: config.reverse_geocoding_query.clone(),
            nearby_places_api: config.nearby_places_api,
            filter_reverse_geocoding_by_types: config.filter_reverse_geocoding_by_types.clone(),
        }
    }
}

/// Keeps results sharing at least one type with `types`; an empty allow-list
/// keeps everything.
pub fn filter_results_by_types(
    results: Vec<LegacyPlaceResult>,
    types: &[String],
) -> Vec<LegacyPlaceResult> {
    if types.is_empty() {
        return results;
    }

    results
        .into_iter()
        .filter(|r| r.types.iter().any(|t| types.contains(t)))
        .collect()
}

fn into_suggestions(
    response: LegacyPlaceResultsResponse,
    filter_types: Option<&[String]>,
) -> Result<Vec<Suggestion>, PlacesServiceError> {
    if let Some(message) = response.error_message {
        return Err(PlacesServiceError::Api(message));
    }

    let results = response.results.unwrap_or_default();
    let results = match filter_types {
        Some(types) => filter_results_by_types(results, types),
        None => results,
    };

    Ok(results.into_iter().map(Suggestion::from).collect())
}

/// Reverse geocoding, shared by both providers.
pub async fn reverse_geocode(
    service: &LegacyPlacesService,
    location: LatLng,
    params: QueryParams,
    filter_types: &[String],
) -> Result<Vec<Suggestion>, PlacesServiceError> {
    let response = service.get_reverse_geocode(location, params).await?;
    into_suggestions(response, Some(filter_types))
}

pub struct LegacyPlacesProvider {
    service: LegacyPlacesService,
    options: LegacyQueryOptions,
}

impl LegacyPlacesProvider {
    pub fn new(service: LegacyPlacesService, options: LegacyQueryOptions) -> Self {
        Self { service, options }
    }

    fn with_language(&self, mut params: QueryParams) -> QueryParams {
        if let Some(language) = &self.options.language {
            params
                .entry("language".to_string())
                .or_insert_with(|| language.clone());
        }
        params
    }
}

#[async_trait]
impl PlaceProvider for LegacyPlacesProvider {
    async fn autocomplete(&self, text: &str) -> Result<Vec<Suggestion>, PlacesServiceError> {
        let mut params = self.with_language(self.options.query.clone());
        if let Some(types) = &self.options.types {
            params.insert("types".to_string(), types.clone());
        }
        if let Some(country) = &self.options.country_code {
            params.insert(
                "components".to_string(),
                format!("country:{}", country.to_lowercase()),
            );
        }

        let response = self.service.get_autocomplete(text, params).await?;

        if let Some(message) = response.error_message {
            return Err(PlacesServiceError::Api(message));
        }

        Ok(response.predictions.unwrap_or_default())
    }

    async fn search_nearby(
        &self,
        location: LatLng,
    ) -> Result<Vec<Suggestion>, PlacesServiceError> {
        match self.options.nearby_places_api {
            NearbyPlacesApi::GoogleReverseGeocoding => {
                reverse_geocode(
                    &self.service,
                    location,
                    self.options.reverse_geocoding_query.clone(),
                    &self.options.filter_reverse_geocoding_by_types,
                )
                .await
            }
            NearbyPlacesApi::GooglePlacesSearch | NearbyPlacesApi::None => {
                let response = self
                    .service
                    .get_nearby_search(location, self.options.nearby_search_query.clone())
                    .await?;
                into_suggestions(response, None)
            }
        }
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesServiceError> {
        let mut body = self
            .service
            .get_place_details(place_id, self.with_language(self.options.details_query.clone()))
            .await?;

        if body.get("status").and_then(Value::as_str) != Some("OK") {
            warn!(place_id, status = ?body.get("status"), "place details not found");
            return Err(PlacesServiceError::NotFound(body));
        }

        let result = body.get_mut("result").map(Value::take).unwrap_or_default();
        serde_json::from_value(result).map_err(|e| {
            PlacesServiceError::Internal(format!("Failed to parse place details: {}", e))
        })
    }
}
