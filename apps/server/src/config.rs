//! Server configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0:3000")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// JSON file holding the user list
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Whether to enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// Allowed CORS origins (any origin when empty)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

/// `data/users.json` next to the installed binary, falling back to the
/// working directory when the executable path is unknown.
fn default_data_file() -> PathBuf {
    let relative = PathBuf::from("data").join("users.json");
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&relative)))
        .unwrap_or(relative)
}

fn default_enable_cors() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            data_file: default_data_file(),
            enable_cors: default_enable_cors(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let file_config = match Self::find_config_file() {
            Some(config_path) => {
                let contents = std::fs::read_to_string(&config_path)?;
                Some(toml::from_str::<ServerConfig>(&contents)?)
            }
            None => None,
        };

        let config = Self::from_sources(file_config, |key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Layer the sources: defaults, then the config file, then environment
    /// variables. Any variable that is set wins over the file, even when it
    /// repeats a default value.
    fn from_sources(
        file_config: Option<ServerConfig>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut config = file_config.unwrap_or_default();
        config.apply_env(var);
        config
    }

    /// Override fields from environment variables
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(port) = var("PORT") {
            self.bind_address = format!("0.0.0.0:{}", port.trim());
        }

        if let Some(addr) = var("USERDIR_BIND_ADDRESS") {
            self.bind_address = addr;
        }

        if let Some(path) = var("USERDIR_DATA_FILE") {
            self.data_file = PathBuf::from(path);
        }

        if let Some(val) = var("USERDIR_ENABLE_CORS") {
            self.enable_cors = val.parse().unwrap_or(true);
        }

        if let Some(origins) = var("USERDIR_CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(level) = var("USERDIR_LOG_LEVEL") {
            self.log_level = level;
        }

        if let Some(format) = var("USERDIR_LOG_FORMAT") {
            self.log_format = LogFormat::parse(&format).unwrap_or_default();
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let locations = [
            PathBuf::from("userdir-server.toml"),
            PathBuf::from("/etc/userdir/server.toml"),
            dirs::config_dir()
                .map(|p| p.join("userdir").join("server.toml"))
                .unwrap_or_default(),
        ];

        locations
            .into_iter()
            .find(|p| !p.as_os_str().is_empty() && p.exists())
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingDataFile);
        }

        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::MissingBindAddress);
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Data file path must not be empty")]
    MissingDataFile,

    #[error("Bind address must not be empty")]
    MissingBindAddress,

    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert!(config.data_file.ends_with("data/users.json"));
        assert!(config.enable_cors);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_port_env_matches_node_convention() {
        let mut config = ServerConfig::default();
        config.apply_env(env(&[("PORT", "8081")]));
        assert_eq!(config.bind_address, "0.0.0.0:8081");
    }

    #[test]
    fn test_bind_address_wins_over_port() {
        let mut config = ServerConfig::default();
        config.apply_env(env(&[
            ("PORT", "8081"),
            ("USERDIR_BIND_ADDRESS", "127.0.0.1:9000"),
        ]));
        assert_eq!(config.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServerConfig::default();
        config.apply_env(env(&[
            ("USERDIR_DATA_FILE", "/var/lib/userdir/users.json"),
            ("USERDIR_CORS_ORIGINS", "http://localhost:4200, https://app.example.com,"),
            ("USERDIR_LOG_FORMAT", "JSON"),
            ("USERDIR_ENABLE_CORS", "false"),
        ]));

        assert_eq!(config.data_file, PathBuf::from("/var/lib/userdir/users.json"));
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:4200", "https://app.example.com"]
        );
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_file_overrides_defaults_env_overrides_file() {
        let file_config: ServerConfig = toml::from_str(
            r#"
            bind_address = "127.0.0.1:4000"
            data_file = "/srv/users.json"
            log_level = "debug"
            "#,
        )
        .unwrap();

        let config =
            ServerConfig::from_sources(Some(file_config), env(&[("USERDIR_LOG_LEVEL", "warn")]));

        assert_eq!(config.bind_address, "127.0.0.1:4000");
        assert_eq!(config.data_file, PathBuf::from("/srv/users.json"));
        assert_eq!(config.log_level, "warn");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_default_data_file_sits_next_to_binary() {
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(
            ServerConfig::default().data_file,
            exe_dir.join("data").join("users.json")
        );
    }

    #[test]
    fn test_env_matching_default_still_beats_file() {
        let file_config: ServerConfig =
            toml::from_str(r#"bind_address = "127.0.0.1:4000""#).unwrap();

        let config =
            ServerConfig::from_sources(Some(file_config), env(&[("PORT", "3000")]));

        assert_eq!(config.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_rejects_empty_data_file() {
        let config = ServerConfig {
            data_file: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingDataFile)));
    }
}
