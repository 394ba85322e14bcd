//! Endpoint configuration.

use anyhow::Result;
use serde::Deserialize;

/// OAuth2 token endpoint used for the client-credentials grant.
pub const TOKEN_URL: &str = "https://www.myextrabat.com/authentification/oauth2/token";

/// Base URL every API endpoint path is appended to.
pub const API_URL: &str = "https://api.extrabat.com/";

/// Where the client sends its requests.
///
/// Can be stored as a JSON object on disk; missing keys keep their defaults:
/// ```json
/// {
///   "token_url": "https://www.myextrabat.com/authentification/oauth2/token",
///   "api_url": "https://api.extrabat.com/"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtrabatConfig {
    pub token_url: String,
    pub api_url: String,
}

impl Default for ExtrabatConfig {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            api_url: API_URL.to_string(),
        }
    }
}

impl ExtrabatConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_default_points_at_production() {
        let config = ExtrabatConfig::default();
        assert_eq!(config.token_url, TOKEN_URL);
        assert_eq!(config.api_url, API_URL);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let path = temp_path("extrabat_test_config_partial.json");
        fs::write(&path, r#"{"api_url": "http://localhost:9000/"}"#).unwrap();

        let config = ExtrabatConfig::load(&path).unwrap();
        assert_eq!(config.api_url, "http://localhost:9000/");
        assert_eq!(config.token_url, TOKEN_URL);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_fails() {
        let path = temp_path("extrabat_test_config_does_not_exist.json");
        let _ = fs::remove_file(&path);
        assert!(ExtrabatConfig::load(&path).is_err());
    }
}
