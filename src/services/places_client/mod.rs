pub mod legacy_places_service;
pub mod legacy_provider;
pub mod migrated_places_service;
pub mod migrated_provider;
pub mod place_provider;
pub mod types;
