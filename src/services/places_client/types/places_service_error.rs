use serde_json::Value;

#[derive(Debug)]
pub enum PlacesServiceError {
    /// The upstream answered with an `error_message`.
    Api(String),
    /// The upstream answered, but not with the requested place. Carries the
    /// response body.
    NotFound(Value),
    Timeout,
    Transport(String),
    Internal(String),
}

impl PlacesServiceError {
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PlacesServiceError::Timeout
        } else if e.is_decode() {
            PlacesServiceError::Internal(format!("Failed to get response body: {}", e))
        } else {
            PlacesServiceError::Transport(format!("Failed to send request: {}", e))
        }
    }
}

impl std::fmt::Display for PlacesServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PlacesServiceError::Api(e) => write!(f, "Places API error: {}", e),
            PlacesServiceError::NotFound(body) => match body.get("status") {
                Some(status) => write!(f, "Place not found: {}", status),
                None => write!(f, "Place not found"),
            },
            PlacesServiceError::Timeout => write!(f, "Request timed out"),
            PlacesServiceError::Transport(e) => write!(f, "Transport error: {}", e),
            PlacesServiceError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for PlacesServiceError {}
