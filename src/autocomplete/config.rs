use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::{
    services::places_client::{
        legacy_places_service::DEFAULT_LEGACY_BASE_URL,
        migrated_places_service::DEFAULT_MIGRATED_BASE_URL,
    },
    types::suggestion::Suggestion,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Native,
    Web,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseOnPlatform {
    Web,
    All,
}

/// Alternative base URL for the legacy endpoints, usually a proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestUrl {
    pub url: String,
    pub use_on_platform: UseOnPlatform,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NearbyPlacesApi {
    /// Hand the raw position to `on_press` without a request.
    None,
    #[default]
    GooglePlacesSearch,
    GoogleReverseGeocoding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigratedApiOptions {
    pub api_key: String,
    pub base_url: String,
    pub field_mask: String,
    pub included_primary_types: Vec<String>,
    /// Sent as `locationBias`, e.g. `{"circle": {...}}` or `{"rectangle": {...}}`.
    pub location_bias: Option<serde_json::Value>,
    pub language_code: Option<String>,
    pub nearby_radius_meters: f64,
    pub nearby_included_types: Vec<String>,
}

impl Default for MigratedApiOptions {
    fn default() -> Self {
        MigratedApiOptions {
            api_key: String::new(),
            base_url: DEFAULT_MIGRATED_BASE_URL.to_string(),
            field_mask: "*".to_string(),
            included_primary_types: ["locality", "sublocality", "point_of_interest", "geocode", "establishment"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            location_bias: None,
            language_code: None,
            nearby_radius_meters: 500.0,
            nearby_included_types: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacesApi {
    #[default]
    Legacy,
    Migrated(MigratedApiOptions),
}

/// Query parameters for the legacy autocomplete endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyQuery {
    pub key: String,
    pub language: Option<String>,
    pub types: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Default for LegacyQuery {
    fn default() -> Self {
        LegacyQuery {
            key: "missing api key".to_string(),
            language: Some("en".to_string()),
            types: Some("geocode".to_string()),
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Text the input starts with; searched on mount.
    pub default_text: String,
    pub min_length: usize,
    pub debounce_ms: u64,
    #[validate(range(min = 1, message = "Must be at least 1 millisecond"))]
    pub timeout_ms: u64,
    pub fetch_details: bool,
    pub auto_fill_on_not_found: bool,
    pub auto_focus: bool,
    #[validate(length(equal = 2, message = "Must be a two-letter region code"))]
    pub country_code: Option<String>,
    pub api: PlacesApi,
    pub query: LegacyQuery,
    pub details_query: BTreeMap<String, String>,
    pub nearby_search_query: BTreeMap<String, String>,
    pub reverse_geocoding_query: BTreeMap<String, String>,
    pub request_url: Option<RequestUrl>,
    pub platform: Platform,
    pub predefined_places: Vec<Suggestion>,
    pub predefined_places_always_visible: bool,
    pub current_location: bool,
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub current_location_label: String,
    pub nearby_places_api: NearbyPlacesApi,
    pub filter_reverse_geocoding_by_types: Vec<String>,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        AutocompleteConfig {
            default_text: String::new(),
            min_length: 0,
            debounce_ms: 0,
            timeout_ms: 20_000,
            fetch_details: false,
            auto_fill_on_not_found: false,
            auto_focus: false,
            country_code: None,
            api: PlacesApi::Legacy,
            query: LegacyQuery::default(),
            details_query: BTreeMap::new(),
            nearby_search_query: BTreeMap::from([
                ("rankby".to_string(), "distance".to_string()),
                ("type".to_string(), "restaurant".to_string()),
            ]),
            reverse_geocoding_query: BTreeMap::new(),
            request_url: None,
            platform: Platform::Native,
            predefined_places: Vec::new(),
            predefined_places_always_visible: false,
            current_location: false,
            current_location_label: "Current location".to_string(),
            nearby_places_api: NearbyPlacesApi::GooglePlacesSearch,
            filter_reverse_geocoding_by_types: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(ValidationErrors),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Invalid config: {}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ValidationErrors> for ConfigError {
    fn from(e: ValidationErrors) -> Self {
        ConfigError::Invalid(e)
    }
}

impl AutocompleteConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AutocompleteConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The configured `request_url` applies when it targets every platform,
    /// or targets web and this is a web build.
    fn active_request_url(&self) -> Option<&RequestUrl> {
        match &self.request_url {
            Some(r) if r.use_on_platform == UseOnPlatform::All => Some(r),
            Some(r) if self.platform == Platform::Web => Some(r),
            _ => None,
        }
    }

    pub fn request_base_url(&self) -> &str {
        self.active_request_url()
            .map(|r| r.url.as_str())
            .unwrap_or(DEFAULT_LEGACY_BASE_URL)
    }

    pub fn request_headers(&self) -> BTreeMap<String, String> {
        self.active_request_url()
            .map(|r| r.headers.clone())
            .unwrap_or_default()
    }

    /// Web builds cannot call Google directly and need a `request_url`.
    pub fn supported_platform(&self) -> bool {
        self.platform != Platform::Web || self.request_url.is_some()
    }

    pub fn uses_migrated_api(&self) -> bool {
        matches!(self.api, PlacesApi::Migrated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_defaults() {
        let config = AutocompleteConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(config.request_base_url(), DEFAULT_LEGACY_BASE_URL);
        assert_eq!(config.nearby_search_query["type"], "restaurant");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_migrated_api() {
        let config = AutocompleteConfig::from_json(
            r#"{
                "min_length": 2,
                "country_code": "AE",
                "api": { "kind": "migrated", "api_key": "k" }
            }"#,
        )
        .unwrap();

        assert!(config.uses_migrated_api());
        match config.api {
            PlacesApi::Migrated(options) => {
                assert_eq!(options.api_key, "k");
                assert_eq!(options.base_url, DEFAULT_MIGRATED_BASE_URL);
            }
            PlacesApi::Legacy => panic!("expected migrated api"),
        }
    }

    #[test]
    fn legacy_query_keeps_extra_params() {
        let config =
            AutocompleteConfig::from_json(r#"{ "query": { "key": "k", "sessiontoken": "s" } }"#)
                .unwrap();
        assert_eq!(config.query.key, "k");
        assert_eq!(config.query.extra["sessiontoken"], "s");
        assert_eq!(config.query.language.as_deref(), Some("en"));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = AutocompleteConfig::from_json(r#"{ "timeout_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AutocompleteConfig::from_json(r#"{ "country_code": "UAE" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AutocompleteConfig::from_json("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn request_url_resolution() {
        let mut config = AutocompleteConfig {
            request_url: Some(RequestUrl {
                url: "https://proxy.example".to_string(),
                use_on_platform: UseOnPlatform::Web,
                headers: BTreeMap::from([("authorization".to_string(), "t".to_string())]),
            }),
            ..Default::default()
        };

        assert_eq!(config.request_base_url(), DEFAULT_LEGACY_BASE_URL);
        assert!(config.request_headers().is_empty());

        config.platform = Platform::Web;
        assert_eq!(config.request_base_url(), "https://proxy.example");
        assert_eq!(config.request_headers()["authorization"], "t");

        config.platform = Platform::Native;
        if let Some(r) = config.request_url.as_mut() {
            r.use_on_platform = UseOnPlatform::All;
        }
        assert_eq!(config.request_base_url(), "https://proxy.example");
    }

    #[test]
    fn web_without_request_url_is_unsupported() {
        let config = AutocompleteConfig {
            platform: Platform::Web,
            ..Default::default()
        };
        assert!(!config.supported_platform());
    }
}
