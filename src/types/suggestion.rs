use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lat_lng_location::LatLng;

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StructuredFormatting {
    #[serde(default)]
    pub main_text: String,
    #[serde(default)]
    pub secondary_text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Geometry {
    pub location: LatLng,
    /// Viewport, bounds and whatever else the upstream sent alongside.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Geometry {
    pub fn at(location: LatLng) -> Self {
        Geometry {
            location,
            extra: Map::new(),
        }
    }
}

/// One row of the result list.
///
/// Legacy predictions deserialize into this shape directly; other upstream
/// shapes are converted by their provider. Unknown upstream fields are kept
/// in `extra` so callers can still reach them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Suggestion {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_formatting: Option<StructuredFormatting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(default, rename = "isLoading", skip_serializing_if = "is_false")]
    pub is_loading: bool,
    #[serde(default, rename = "isPredefinedPlace", skip_serializing_if = "is_false")]
    pub is_predefined_place: bool,
    #[serde(default, rename = "isCurrentLocation", skip_serializing_if = "is_false")]
    pub is_current_location: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Suggestion {
    pub fn new(description: impl Into<String>, place_id: impl Into<String>) -> Self {
        Suggestion {
            description: description.into(),
            place_id: Some(place_id.into()),
            ..Default::default()
        }
    }

    pub fn current_location(label: &str) -> Self {
        Suggestion {
            description: label.to_string(),
            is_current_location: true,
            ..Default::default()
        }
    }

    /// Place id, ignoring the empty string some callers use for "none".
    pub fn place_id(&self) -> Option<&str> {
        self.place_id.as_deref().filter(|id| !id.is_empty())
    }
}
