//! Application configuration loader for Steward.
//!
//! Reads `config.toml` from the data directory (`~/.steward/` in
//! production) and deserializes it into [`AppConfig`]. Falls back to
//! sensible defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Application configuration for the `steward` binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the interactions endpoint binds to.
    pub listen_addr: String,
    /// Database URL override; defaults to the data-dir database.
    pub database_url: Option<String>,
    /// Base URL of the chat platform REST API.
    pub api_base_url: String,
    /// Bot token for authenticating outbound REST calls.
    pub bot_token: String,
    /// Shared secret for verifying inbound interaction signatures.
    pub interaction_secret: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8321".to_string(),
            database_url: None,
            api_base_url: "https://platform.example.com/api/v10".to_string(),
            bot_token: String::new(),
            interaction_secret: String::new(),
        }
    }
}

/// Resolve the data directory: `STEWARD_DATA_DIR` if set, otherwise
/// `~/.steward`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STEWARD_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".steward")
}

/// Load application configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns
///   the default.
/// - If the file exists and parses successfully, returns the parsed
///   config.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.listen_addr, "127.0.0.1:8321");
        assert!(config.database_url.is_none());
        assert!(config.bot_token.is_empty());
    }

    #[tokio::test]
    async fn valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
listen_addr = "0.0.0.0:9000"
api_base_url = "https://chat.example.org/api"
bot_token = "token-123"
interaction_secret = "secret-456"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.api_base_url, "https://chat.example.org/api");
        assert_eq!(config.bot_token, "token-123");
        assert_eq!(config.interaction_secret, "secret-456");
    }

    #[tokio::test]
    async fn invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.listen_addr, "127.0.0.1:8321");
    }

    #[test]
    fn data_dir_resolution() {
        // Can't mutate the environment safely in parallel tests; assert
        // against whichever source is in effect.
        let dir = resolve_data_dir();
        match std::env::var("STEWARD_DATA_DIR") {
            Ok(env_dir) => assert_eq!(dir, PathBuf::from(env_dir)),
            Err(_) => assert!(dir.ends_with(".steward") || dir == PathBuf::from(".")),
        }
    }
}
