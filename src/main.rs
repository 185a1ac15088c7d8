use std::{env, error::Error};

use places_autocomplete::app::gen_app;
use tracing::info;

const DEFAULT_PLACES_HOST: &str = "https://maps.googleapis.com";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    info!("Starting places proxy...");

    let host = env::var("PLACES_API_HOST").unwrap_or_else(|_| DEFAULT_PLACES_HOST.to_string());
    let api_key = env::var("PLACES_API_KEY")?;
    let auth_key = env::var("PROXY_AUTH_KEY").ok();
    let addr = env::var("PROXY_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    if auth_key.is_none() {
        info!("PROXY_AUTH_KEY not set, requests are not authenticated");
    }

    let app = gen_app(&host, &api_key, auth_key);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
