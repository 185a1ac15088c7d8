use async_trait::async_trait;

use super::{
    legacy_places_service::{LegacyPlacesService, QueryParams},
    legacy_provider::reverse_geocode,
    migrated_places_service::MigratedPlacesService,
    place_provider::PlaceProvider,
    types::{
        migrated_places_response::{
            MigratedAutocompleteRequest, MigratedCircle, MigratedLatLng,
            MigratedLocationRestriction, MigratedNearbyRequest,
        },
        places_service_error::PlacesServiceError,
    },
};
use crate::{
    autocomplete::config::{AutocompleteConfig, NearbyPlacesApi, PlacesApi},
    types::{lat_lng_location::LatLng, place_details::PlaceDetails, suggestion::Suggestion},
};

#[derive(Clone, Default)]
pub struct MigratedQueryOptions {
    pub included_region_codes: Vec<String>,
    pub included_primary_types: Vec<String>,
    pub location_bias: Option<serde_json::Value>,
    pub language_code: Option<String>,
    pub nearby_places_api: NearbyPlacesApi,
    pub nearby_radius_meters: f64,
    pub nearby_included_types: Vec<String>,
    pub reverse_geocoding_query: QueryParams,
    pub filter_reverse_geocoding_by_types: Vec<String>,
}

impl From<&AutocompleteConfig> for MigratedQueryOptions {
    fn from(config: &AutocompleteConfig) -> Self {
        let mut options = MigratedQueryOptions {
            included_region_codes: config
                .country_code
                .iter()
                .map(|c| c.to_lowercase())
                .collect(),
            nearby_places_api: config.nearby_places_api,
            reverse_geocoding_query: config.reverse_geocoding_query.clone(),
            filter_reverse_geocoding_by_types: config.filter_reverse_geocoding_by_types.clone(),
            ..Default::default()
        };

        if let PlacesApi::Migrated(migrated) = &config.api {
            options.included_primary_types = migrated.included_primary_types.clone();
            options.location_bias = migrated.location_bias.clone();
            options.language_code = migrated.language_code.clone();
            options.nearby_radius_meters = migrated.nearby_radius_meters;
            options.nearby_included_types = migrated.nearby_included_types.clone();
        }

        options
    }
}

pub struct MigratedPlacesProvider {
    service: MigratedPlacesService,
    geocoder: LegacyPlacesService,
    options: MigratedQueryOptions,
}

impl MigratedPlacesProvider {
    pub fn new(
        service: MigratedPlacesService,
        geocoder: LegacyPlacesService,
        options: MigratedQueryOptions,
    ) -> Self {
        Self {
            service,
            geocoder,
            options,
        }
    }
}

#[async_trait]
impl PlaceProvider for MigratedPlacesProvider {
    async fn autocomplete(&self, text: &str) -> Result<Vec<Suggestion>, PlacesServiceError> {
        let response = self
            .service
            .post_autocomplete(&MigratedAutocompleteRequest {
                input: text.to_string(),
                included_region_codes: self.options.included_region_codes.clone(),
                included_primary_types: self.options.included_primary_types.clone(),
                location_bias: self.options.location_bias.clone(),
                language_code: self.options.language_code.clone(),
            })
            .await?;

        Ok(response.into_suggestions())
    }

    async fn search_nearby(
        &self,
        location: LatLng,
    ) -> Result<Vec<Suggestion>, PlacesServiceError> {
        if self.options.nearby_places_api == NearbyPlacesApi::GoogleReverseGeocoding {
            return reverse_geocode(
                &self.geocoder,
                location,
                self.options.reverse_geocoding_query.clone(),
                &self.options.filter_reverse_geocoding_by_types,
            )
            .await;
        }

        let response = self
            .service
            .post_search_nearby(&MigratedNearbyRequest {
                location_restriction: MigratedLocationRestriction {
                    circle: MigratedCircle {
                        center: MigratedLatLng {
                            latitude: location.lat,
                            longitude: location.lng,
                        },
                        radius: self.options.nearby_radius_meters,
                    },
                },
                included_types: self.options.nearby_included_types.clone(),
                language_code: self.options.language_code.clone(),
            })
            .await?;

        Ok(response.places.into_iter().map(Suggestion::from).collect())
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesServiceError> {
        let body = self.service.get_place(place_id).await?;
        PlaceDetails::from_migrated(body).map_err(|e| {
            PlacesServiceError::Internal(format!("Failed to parse place details: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, time::Duration};

    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::services::places_client::{
        legacy_places_service::LegacyPlacesConfig, migrated_places_service::MigratedPlacesConfig,
    };

    fn provider(host: &str, options: MigratedQueryOptions) -> MigratedPlacesProvider {
        MigratedPlacesProvider::new(
            MigratedPlacesService::new(MigratedPlacesConfig {
                base_url: host.to_string(),
                api_key: "migrated-key".to_string(),
                timeout: Duration::from_secs(5),
                field_mask: "*".to_string(),
            }),
            LegacyPlacesService::new(LegacyPlacesConfig {
                base_url: format!("{}/maps/api", host),
                api_key: "migrated-key".to_string(),
                timeout: Duration::from_secs(5),
                headers: BTreeMap::new(),
            }),
            options,
        )
    }

    #[tokio::test]
    async fn autocomplete_posts_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/places:autocomplete")
            .match_header("X-Goog-Api-Key", "migrated-key")
            .match_body(Matcher::PartialJson(json!({
                "input": "Dubai Mall",
                "includedRegionCodes": ["ae"],
                "includedPrimaryTypes": ["establishment"]
            })))
            .with_body(
                json!({
                    "suggestions": [{
                        "placePrediction": {
                            "placeId": "ChIJ-dubai-mall",
                            "text": { "text": "The Dubai Mall - Dubai - United Arab Emirates" },
                            "structuredFormat": {
                                "mainText": { "text": "The Dubai Mall" },
                                "secondaryText": { "text": "Dubai - United Arab Emirates" }
                            },
                            "types": ["shopping_mall", "establishment"]
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let options = MigratedQueryOptions {
            included_region_codes: vec!["ae".to_string()],
            included_primary_types: vec!["establishment".to_string()],
            ..Default::default()
        };
        let suggestions = provider(&server.url(), options)
            .autocomplete("Dubai Mall")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(suggestions.len(), 1);
        assert_eq!(
            suggestions[0].description,
            "The Dubai Mall - Dubai - United Arab Emirates"
        );
        assert_eq!(suggestions[0].place_id(), Some("ChIJ-dubai-mall"));
        let formatting = suggestions[0].structured_formatting.as_ref().unwrap();
        assert_eq!(formatting.secondary_text, "Dubai - United Arab Emirates");
    }

    #[tokio::test]
    async fn details_remap_location() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/places/ChIJ-dubai-mall")
            .with_body(
                json!({
                    "id": "ChIJ-dubai-mall",
                    "location": { "latitude": 25.1972, "longitude": 55.2796 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let details = provider(&server.url(), MigratedQueryOptions::default())
            .place_details("ChIJ-dubai-mall")
            .await
            .unwrap();

        assert_eq!(
            details.geometry.unwrap().location,
            LatLng::new(25.1972, 55.2796)
        );
    }

    #[tokio::test]
    async fn nearby_search_posts_circle() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/places:searchNearby")
            .match_body(Matcher::PartialJson(json!({
                "locationRestriction": {
                    "circle": { "center": { "latitude": 1.0, "longitude": 2.0 }, "radius": 250.0 }
                }
            })))
            .with_body(
                json!({ "places": [{ "id": "n1", "displayName": { "text": "Cafe" } }] }).to_string(),
            )
            .create_async()
            .await;

        let options = MigratedQueryOptions {
            nearby_places_api: NearbyPlacesApi::GooglePlacesSearch,
            nearby_radius_meters: 250.0,
            ..Default::default()
        };
        let suggestions = provider(&server.url(), options)
            .search_nearby(LatLng::new(1.0, 2.0))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(suggestions[0].description, "Cafe");
    }

    #[tokio::test]
    async fn reverse_geocoding_uses_geocode_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/maps/api/geocode/json")
            .match_query(Matcher::UrlEncoded("key".into(), "migrated-key".into()))
            .with_body(
                json!({
                    "status": "OK",
                    "results": [
                        { "place_id": "r", "formatted_address": "Diner", "types": ["restaurant"] },
                        { "place_id": "p", "formatted_address": "Park", "types": ["park"] }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let options = MigratedQueryOptions {
            nearby_places_api: NearbyPlacesApi::GoogleReverseGeocoding,
            filter_reverse_geocoding_by_types: vec!["restaurant".to_string()],
            ..Default::default()
        };
        let suggestions = provider(&server.url(), options)
            .search_nearby(LatLng::new(1.0, 2.0))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].description, "Diner");
    }
}
