use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// `lat,lng` as the legacy endpoints expect it.
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_query_value() {
        assert_eq!(LatLng::new(25.2, 55.27).to_query_value(), "25.2,55.27");
    }

    #[test]
    fn rejects_non_finite() {
        assert!(!LatLng::new(f64::NAN, 1.0).is_finite());
        assert!(LatLng::new(0.0, 0.0).is_finite());
    }
}
