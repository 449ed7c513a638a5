use crate::price::FunkitClient;

/// Shared state for the proxy handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub upstream: FunkitClient, // Holds the server-side API key
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(upstream: FunkitClient) -> Self {
        Self {
            upstream,
            startup_time: chrono::Utc::now(),
        }
    }
}
