pub mod legacy_places_response;
pub mod migrated_places_response;
pub mod places_service_error;
