use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use urlencoding::encode;

use super::types::{
    migrated_places_response::{
        MigratedAutocompleteRequest, MigratedAutocompleteResponse, MigratedErrorResponse,
        MigratedNearbyRequest, MigratedNearbyResponse,
    },
    places_service_error::PlacesServiceError,
};

pub const DEFAULT_MIGRATED_BASE_URL: &str = "https://places.googleapis.com";

#[derive(Clone)]
pub struct MigratedPlacesConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub field_mask: String,
}

/// JSON client for the migrated (`places.googleapis.com/v1`) Places API.
#[derive(Clone)]
pub struct MigratedPlacesService {
    config: MigratedPlacesConfig,
    client: reqwest::Client,
}

impl MigratedPlacesService {
    pub fn new(config: MigratedPlacesConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub async fn post_autocomplete(
        &self,
        body: &MigratedAutocompleteRequest,
    ) -> Result<MigratedAutocompleteResponse, PlacesServiceError> {
        self.post_json("/v1/places:autocomplete", body).await
    }

    pub async fn post_search_nearby(
        &self,
        body: &MigratedNearbyRequest,
    ) -> Result<MigratedNearbyResponse, PlacesServiceError> {
        self.post_json("/v1/places:searchNearby", body).await
    }

    /// Raw place body. Any non-success status is reported as
    /// [`PlacesServiceError::NotFound`] with whatever body came back.
    pub async fn get_place(&self, place_id: &str) -> Result<serde_json::Value, PlacesServiceError> {
        let url = format!("{}/v1/places/{}", self.config.base_url, encode(place_id));
        debug!(place_id, "migrated place details request");

        let resp = self.send(self.client.get(&url)).await?;
        let status = resp.status();
        let body = resp
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);

        if !status.is_success() {
            return Err(PlacesServiceError::NotFound(serde_json::json!({
                "status": status.as_u16(),
                "body": body,
            })));
        }

        Ok(body)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PlacesServiceError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(path, "migrated places request");

        let resp = self.send(self.client.post(&url).json(body)).await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let message = match resp.json::<MigratedErrorResponse>().await {
                Ok(err) => err.error.message,
                Err(_) => format!("Upstream responded with {}", status),
            };
            return Err(PlacesServiceError::Api(message));
        }

        resp.json::<T>()
            .await
            .map_err(PlacesServiceError::from_reqwest)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, PlacesServiceError> {
        request
            .timeout(self.config.timeout)
            .header("X-Goog-Api-Key", &self.config.api_key)
            .header("X-Goog-FieldMask", &self.config.field_mask)
            .send()
            .await
            .map_err(PlacesServiceError::from_reqwest)
    }
}
