use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lat_lng_location::LatLng, suggestion::Geometry};

/// Resolved details for one place.
///
/// The upstream record is kept as-is in `fields`; `geometry` is always in the
/// legacy `geometry.location.{lat,lng}` shape regardless of which API
/// answered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlaceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct MigratedLocation {
    latitude: f64,
    longitude: f64,
}

impl PlaceDetails {
    pub fn at(location: LatLng) -> Self {
        PlaceDetails {
            geometry: Some(Geometry::at(location)),
            fields: Map::new(),
        }
    }

    /// Builds details from a migrated-API place, remapping
    /// `location.{latitude,longitude}` onto `geometry.location`.
    pub fn from_migrated(value: Value) -> Result<Self, serde_json::Error> {
        let mut details: PlaceDetails = serde_json::from_value(value)?;

        let location = details
            .fields
            .get("location")
            .cloned()
            .and_then(|l| serde_json::from_value::<MigratedLocation>(l).ok());

        if let Some(location) = location {
            details.geometry = Some(Geometry::at(LatLng::new(
                location.latitude,
                location.longitude,
            )));
        }

        Ok(details)
    }

    /// Short names of the address components, from either
    /// `address_components[].short_name` or `addressComponents[].shortText`.
    pub fn address_short_names(&self) -> Vec<&str> {
        let legacy = self.components("address_components", "short_name");
        let migrated = self.components("addressComponents", "shortText");
        legacy.into_iter().chain(migrated).collect()
    }

    pub fn is_in_country(&self, country_code: &str) -> bool {
        self.address_short_names()
            .iter()
            .any(|name| name.eq_ignore_ascii_case(country_code))
    }

    fn components(&self, list: &str, name: &str) -> Vec<&str> {
        self.fields
            .get(list)
            .and_then(Value::as_array)
            .map(|components| {
                components
                    .iter()
                    .filter_map(|c| c.get(name).and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}
