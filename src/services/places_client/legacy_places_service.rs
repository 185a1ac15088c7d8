use std::{collections::BTreeMap, time::Duration};

use serde::de::DeserializeOwned;
use tracing::debug;
use urlencoding::encode;

use super::types::{
    legacy_places_response::{LegacyAutocompleteResponse, LegacyPlaceResultsResponse},
    places_service_error::PlacesServiceError,
};
use crate::types::lat_lng_location::LatLng;

pub const DEFAULT_LEGACY_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

pub const AUTOCOMPLETE_PATH: &str = "/place/autocomplete/json";
pub const DETAILS_PATH: &str = "/place/details/json";
pub const NEARBY_SEARCH_PATH: &str = "/place/nearbysearch/json";
pub const REVERSE_GEOCODE_PATH: &str = "/geocode/json";

pub type QueryParams = BTreeMap<String, String>;

#[derive(Clone)]
pub struct LegacyPlacesConfig {
    /// Everything before `/place/...`, e.g. `https://maps.googleapis.com/maps/api`.
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Extra headers sent with every request, for proxies that want them.
    pub headers: BTreeMap<String, String>,
}

/// Query-string client for the legacy Places and Geocoding endpoints.
#[derive(Clone)]
pub struct LegacyPlacesService {
    config: LegacyPlacesConfig,
    client: reqwest::Client,
}

fn query_string(params: &QueryParams) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

impl LegacyPlacesService {
    pub fn new(config: LegacyPlacesConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get_autocomplete(
        &self,
        input: &str,
        mut params: QueryParams,
    ) -> Result<LegacyAutocompleteResponse, PlacesServiceError> {
        params.insert("input".to_string(), input.to_string());
        self.get_json(AUTOCOMPLETE_PATH, params).await
    }

    pub async fn get_nearby_search(
        &self,
        location: LatLng,
        mut params: QueryParams,
    ) -> Result<LegacyPlaceResultsResponse, PlacesServiceError> {
        params.insert("location".to_string(), location.to_query_value());
        self.get_json(NEARBY_SEARCH_PATH, params).await
    }

    pub async fn get_reverse_geocode(
        &self,
        location: LatLng,
        mut params: QueryParams,
    ) -> Result<LegacyPlaceResultsResponse, PlacesServiceError> {
        params.insert("latlng".to_string(), location.to_query_value());
        self.get_json(REVERSE_GEOCODE_PATH, params).await
    }

    /// Raw details body; the caller decides what a non-`OK` status means.
    pub async fn get_place_details(
        &self,
        place_id: &str,
        mut params: QueryParams,
    ) -> Result<serde_json::Value, PlacesServiceError> {
        params.insert("placeid".to_string(), place_id.to_string());
        self.get_json(DETAILS_PATH, params).await
    }

    /// Passes a request through to `path` with the configured key, returning
    /// the upstream body untouched.
    pub async fn forward(
        &self,
        path: &str,
        params: QueryParams,
    ) -> Result<serde_json::Value, PlacesServiceError> {
        self.get_json(path, params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: QueryParams,
    ) -> Result<T, PlacesServiceError> {
        params.insert("key".to_string(), self.config.api_key.clone());

        let url = format!(
            "{}{}?{}",
            self.config.base_url,
            path,
            query_string(&params)
        );
        debug!(path, "legacy places request");

        let mut request = self.client.get(&url).timeout(self.config.timeout);
        for (name, value) in &self.config.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let resp = request
            .send()
            .await
            .map_err(PlacesServiceError::from_reqwest)?;

        if !resp.status().is_success() {
            return Err(PlacesServiceError::Transport(format!(
                "Upstream responded with {}",
                resp.status()
            )));
        }

        resp.json::<T>()
            .await
            .map_err(PlacesServiceError::from_reqwest)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    fn service(host: &str) -> LegacyPlacesService {
        LegacyPlacesService::new(LegacyPlacesConfig {
            base_url: format!("{}/maps/api", host),
            api_key: "key".to_string(),
            timeout: Duration::from_secs(5),
            headers: BTreeMap::from([("authorization".to_string(), "secret".to_string())]),
        })
    }

    #[test]
    fn encodes_query_values() {
        let params = QueryParams::from([
            ("input".to_string(), "Dubai Mall & more".to_string()),
            ("components".to_string(), "country:ae".to_string()),
        ]);

        assert_eq!(
            query_string(&params),
            "components=country%3Aae&input=Dubai%20Mall%20%26%20more"
        );
    }

    #[tokio::test]
    async fn key_overrides_client_supplied_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/maps/api/geocode/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "key".into()),
                Matcher::UrlEncoded("latlng".into(), "1,2".into()),
            ]))
            .match_header("authorization", "secret")
            .with_body(r#"{"status":"OK","results":[]}"#)
            .create_async()
            .await;

        let params = QueryParams::from([("key".to_string(), "stolen".to_string())]);
        let body = service(&server.url())
            .get_reverse_geocode(LatLng::new(1.0, 2.0), params)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body.status, "OK");
    }

    #[tokio::test]
    async fn server_error_is_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/maps/api/place/details/json")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = service(&server.url())
            .get_place_details("abc", QueryParams::new())
            .await
            .unwrap_err();

        assert!(matches!(err, PlacesServiceError::Transport(_)));
    }
}
