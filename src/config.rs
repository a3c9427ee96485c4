use std::path::Path;

use serde::Deserialize;

fn default_port() -> u16 { 8080 }
fn default_cors_permissive() -> bool { true }

/// Environment variable that overrides `auth.access_key`.
pub const ACCESS_KEY_ENV: &str = "FIGBIZ_ACCESS_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// Shared secret required on `/api` routes; `None` disables the check
    pub access_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            cors_permissive: default_cors_permissive(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Applies environment overrides. An empty key counts as unset.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(ACCESS_KEY_ENV) {
            self.auth.access_key = Some(key);
        }
        if self.auth.access_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.auth.access_key = None;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.auth.access_key.is_none());
        assert!(config.cors_permissive);
    }

    #[test]
    fn test_full_config() {
        let config: Config = serde_json::from_str(
            r#"{ "server": { "port": 9000 }, "auth": { "access_key": "fig" }, "cors_permissive": false }"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.access_key.as_deref(), Some("fig"));
        assert!(!config.cors_permissive);
    }
}
