pub mod app_state;
pub mod lat_lng_location;
pub mod place_details;
pub mod suggestion;
