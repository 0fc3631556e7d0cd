//! Application configuration
//!
//! Built once at process start from CLI arguments and the environment,
//! then passed by reference into the components that need it.

/// Environment variable that pins the API key instead of generating one.
pub const API_KEY_ENV: &str = "ORGDIR_API_KEY";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_path: String,
    pub cors_origin: Option<String>,
    /// Pre-configured API key; when absent one is generated and persisted.
    pub api_key: Option<String>,
}

impl AppConfig {
    pub fn new(port: u16, database_path: impl Into<String>, cors_origin: Option<String>) -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());

        Self {
            port,
            database_path: database_path.into(),
            cors_origin,
            api_key,
        }
    }
}
