use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::suggestion::{Geometry, StructuredFormatting, Suggestion};

#[derive(Debug, Serialize, Deserialize)]
pub struct LegacyAutocompleteResponse {
    #[serde(default)]
    pub status: String,
    pub predictions: Option<Vec<Suggestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LegacyPlaceResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of both `nearbysearch` and `geocode`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LegacyPlaceResultsResponse {
    #[serde(default)]
    pub status: String,
    pub results: Option<Vec<LegacyPlaceResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl From<LegacyPlaceResult> for Suggestion {
    fn from(result: LegacyPlaceResult) -> Self {
        let description = result
            .formatted_address
            .clone()
            .or_else(|| result.name.clone())
            .or_else(|| result.vicinity.clone())
            .unwrap_or_default();

        let structured_formatting = StructuredFormatting {
            main_text: result.name.clone().unwrap_or_else(|| description.clone()),
            secondary_text: match result.name {
                Some(_) => result.vicinity.or(result.formatted_address).unwrap_or_default(),
                None => String::new(),
            },
        };

        Suggestion {
            description,
            place_id: result.place_id,
            types: result.types,
            structured_formatting: Some(structured_formatting),
            geometry: result.geometry,
            extra: result.extra,
            ..Default::default()
        }
    }
}
