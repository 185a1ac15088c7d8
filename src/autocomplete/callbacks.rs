use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::types::{lat_lng_location::LatLng, place_details::PlaceDetails, suggestion::Suggestion};

/// Hooks the embedding UI plugs into the component.
///
/// Every method has a default, so implementors only override what they need.
/// The reporting hooks log when left alone.
pub trait AutocompleteCallbacks: Send + Sync {
    /// A row was chosen. `details` is present when they were fetched or, for
    /// the current-location row, when the position is handed over directly.
    fn on_press(&self, _place: &Suggestion, _details: Option<&PlaceDetails>) {}

    /// The details endpoint answered with a non-success status.
    fn on_not_found(&self, response: &Value) {
        warn!("places autocomplete: place not found: {}", response);
    }

    /// The upstream answered with an `error_message`.
    fn on_error(&self, message: &str) {
        warn!("places autocomplete: {}", message);
    }

    /// The request could not be completed.
    fn on_fail(&self, message: &str) {
        warn!("places autocomplete: {}", message);
    }

    fn on_timeout(&self) {
        warn!("places autocomplete: request timeout");
    }

    /// The row list changed and should be re-rendered.
    fn on_rows_changed(&self, _rows: &[Suggestion]) {}

    fn render_description(&self, row: &Suggestion) -> String {
        row.description.clone()
    }

    /// Rewrites the input text before it is sent upstream.
    fn pre_process(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Callbacks that only log.
#[derive(Debug, Default)]
pub struct LoggingCallbacks;

impl AutocompleteCallbacks for LoggingCallbacks {}

/// Source of the device position for the current-location row.
#[async_trait]
pub trait Geolocation: Send + Sync {
    async fn current_position(&self) -> Result<LatLng, String>;
}
