//! Service endpoint configuration loaded from environment variables.

/// Base URLs of the pricing and maps services.
///
/// Reads from environment variables:
/// - `PRICING_ENDPOINT` — pricing service (default: `"http://localhost:8082"`)
/// - `MAPS_ENDPOINT` — maps service (default: `"http://localhost:9191"`)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub pricing_endpoint: String,
    pub maps_endpoint: String,
}

impl ClientConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self::new(
            std::env::var("PRICING_ENDPOINT").unwrap_or(defaults.pricing_endpoint),
            std::env::var("MAPS_ENDPOINT").unwrap_or(defaults.maps_endpoint),
        )
    }

    /// Creates a configuration, trimming trailing slashes from both endpoints.
    pub fn new(pricing_endpoint: impl Into<String>, maps_endpoint: impl Into<String>) -> Self {
        Self {
            pricing_endpoint: trim_endpoint(pricing_endpoint.into()),
            maps_endpoint: trim_endpoint(maps_endpoint.into()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            pricing_endpoint: "http://localhost:8082".to_string(),
            maps_endpoint: "http://localhost:9191".to_string(),
        }
    }
}

fn trim_endpoint(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_string()
}
