//! Runtime configuration for the client.
//!
//! The API origin is baked in at compile time through `TALENT_FINDER_API_URL`
//! (Trunk forwards build-time env vars), falling back to a local backend.

/// Key under which the bearer token lives in `localStorage`.
pub const TOKEN_STORAGE_KEY: &str = "auth_token";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::with_base_url(option_env!("TALENT_FINDER_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slashes() {
        let config = AppConfig::with_base_url("https://api.example.com//");
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn default_points_at_local_backend() {
        if option_env!("TALENT_FINDER_API_URL").is_none() {
            assert_eq!(AppConfig::default().api_base_url, DEFAULT_API_URL);
        }
    }
}
