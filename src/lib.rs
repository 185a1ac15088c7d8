//! Headless Google Places autocomplete.
//!
//! [`autocomplete::component::PlacesAutocomplete`] turns keystrokes into
//! place suggestions and resolved details over either the legacy or the
//! migrated Places API. The `app` module is a small proxy that web builds
//! can point `request_url` at.

pub mod app;
pub mod autocomplete;
pub mod middlewares;
pub mod routes;
pub mod services;
pub mod types;
pub mod utils;
