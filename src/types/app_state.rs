use crate::services::places_client::legacy_places_service::LegacyPlacesService;

#[derive(Clone)]
pub struct AppState {
    pub places_service: LegacyPlacesService,
    pub auth_key: Option<String>,
}
