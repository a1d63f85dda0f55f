//! Configuration Storage
//!
//! This module handles persistent storage of configuration data
//! including the server target, REPL preferences and catalog location.

use crate::error::{Result, ReplError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name
const CONFIG_FILE: &str = "config.toml";

/// Server connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: "50051".to_string(),
        }
    }
}

/// REPL preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Splash text printed on startup (supports `~/`)
    pub splash_text_path: Option<String>,
    /// Whether line history is persisted between sessions
    pub history: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            splash_text_path: None,
            history: true,
        }
    }
}

/// Schema catalog settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a JSON catalog (supports `~/`)
    pub path: Option<String>,
    /// Data-source descriptor shown in the prompt
    pub dsn: String,
}

/// Persistent configuration data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub repl: ReplConfig,
    pub catalog: CatalogConfig,
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ReplError::Config("Could not find configuration directory".to_string()))?
            .join("rpc-repl");

        Ok(config_dir)
    }

    /// Get the configuration file path
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from a file, falling back to defaults if it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;

        toml::from_str(&content).map_err(|e| {
            ReplError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir)?;
        self.save_to(&config_dir.join(CONFIG_FILE))
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ReplError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Path of the history file
    pub fn history_file() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".rpc-repl").join("history"))
    }
}

/// Resolve a user-supplied path, expanding a leading `~/`
///
/// Returns `None` when the home directory or the current directory cannot
/// be determined.
pub fn expand_path(path: &str) -> Option<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        return dirs::home_dir().map(|home| home.join(rest));
    }

    let path = Path::new(path);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        std::env::current_dir().ok().map(|cwd| cwd.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, "50051");
        assert!(config.repl.history);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "grpc.internal"

            [catalog]
            dsn = "mydb"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "grpc.internal");
        assert_eq!(config.server.port, "50051");
        assert_eq!(config.catalog.dsn, "mydb");
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("rpc-repl-config-{}.toml", std::process::id()));
        let mut config = Config::new();
        config.server.port = "8443".to_string();
        config.repl.splash_text_path = Some("~/.rpc-repl/splash.txt".to_string());

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let config = Config::load_from(Path::new("/nonexistent/rpc-repl/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_expand_path() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/splash.txt"), Some(home.join("splash.txt")));
        }
        assert_eq!(expand_path("/etc/motd"), Some(PathBuf::from("/etc/motd")));
        let relative = expand_path("splash.txt").unwrap();
        assert!(relative.is_absolute());
    }
}
