use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{
    lat_lng_location::LatLng,
    suggestion::{Geometry, StructuredFormatting, Suggestion},
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratedAutocompleteRequest {
    pub input: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included_region_codes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included_primary_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_bias: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MigratedText {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratedStructuredFormat {
    pub main_text: Option<MigratedText>,
    pub secondary_text: Option<MigratedText>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratedPlacePrediction {
    pub place_id: Option<String>,
    pub text: Option<MigratedText>,
    pub structured_format: Option<MigratedStructuredFormat>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratedAutocompleteSuggestion {
    pub place_prediction: Option<MigratedPlacePrediction>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MigratedAutocompleteResponse {
    #[serde(default)]
    pub suggestions: Vec<MigratedAutocompleteSuggestion>,
}

impl MigratedAutocompleteResponse {
    /// Place predictions with an id; query predictions are dropped.
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.suggestions
            .into_iter()
            .filter_map(|s| s.place_prediction)
            .filter(|p| p.place_id.as_deref().is_some_and(|id| !id.is_empty()))
            .map(Suggestion::from)
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct MigratedLatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MigratedCircle {
    pub center: MigratedLatLng,
    pub radius: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MigratedLocationRestriction {
    pub circle: MigratedCircle,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratedNearbyRequest {
    pub location_restriction: MigratedLocationRestriction,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratedPlace {
    pub id: String,
    pub display_name: Option<MigratedText>,
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub location: Option<MigratedLatLng>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MigratedNearbyResponse {
    #[serde(default)]
    pub places: Vec<MigratedPlace>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MigratedErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MigratedErrorResponse {
    pub error: MigratedErrorBody,
}

impl From<MigratedPlacePrediction> for Suggestion {
    fn from(prediction: MigratedPlacePrediction) -> Self {
        let (main_text, secondary_text) = match prediction.structured_format {
            Some(format) => (
                format.main_text.map(|t| t.text).unwrap_or_default(),
                format.secondary_text.map(|t| t.text).unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };

        let mut extra = Map::new();
        if let Some(place_id) = &prediction.place_id {
            extra.insert("reference".to_string(), Value::String(place_id.clone()));
        }

        Suggestion {
            description: prediction.text.map(|t| t.text).unwrap_or_default(),
            place_id: prediction.place_id,
            types: prediction.types,
            structured_formatting: Some(StructuredFormatting {
                main_text,
                secondary_text,
            }),
            extra,
            ..Default::default()
        }
    }
}

impl From<MigratedPlace> for Suggestion {
    fn from(place: MigratedPlace) -> Self {
        let name = place.display_name.map(|t| t.text);
        let description = place
            .formatted_address
            .clone()
            .or_else(|| name.clone())
            .unwrap_or_default();

        Suggestion {
            structured_formatting: Some(StructuredFormatting {
                main_text: name.unwrap_or_else(|| description.clone()),
                secondary_text: place.formatted_address.unwrap_or_default(),
            }),
            description,
            place_id: Some(place.id),
            types: place.types,
            geometry: place
                .location
                .map(|l| Geometry::at(LatLng::new(l.latitude, l.longitude))),
            extra: place.extra,
            ..Default::default()
        }
    }
}
