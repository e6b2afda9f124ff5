//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/spotlog/config.toml

pub mod defaults;

use crate::constants::{limits, map};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Upload settings
    #[serde(default)]
    pub uploads: UploadsConfig,

    /// Map display defaults served to the frontend
    #[serde(default)]
    pub map: MapConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Data directory override; empty means the XDG data dir
    #[serde(default)]
    pub data_dir: String,
}

/// Upload settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsConfig {
    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: u64,
}

/// Map display defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial center latitude when no spots exist
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    /// Initial center longitude when no spots exist
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_max_upload_bytes() -> u64 {
    limits::DEFAULT_MAX_UPLOAD_BYTES
}
fn default_center_lat() -> f64 {
    map::DEFAULT_CENTER_LAT
}
fn default_center_lng() -> f64 {
    map::DEFAULT_CENTER_LNG
}
fn default_zoom() -> u8 {
    map::DEFAULT_ZOOM
}

// Implement Default traits
impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            uploads: UploadsConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["store", "data_dir"] => Some(self.store.data_dir.clone()),

            ["uploads", "max_bytes"] => Some(self.uploads.max_bytes.to_string()),

            ["map", "center_lat"] => Some(self.map.center_lat.to_string()),
            ["map", "center_lng"] => Some(self.map.center_lng.to_string()),
            ["map", "zoom"] => Some(self.map.zoom.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["store", "data_dir"] => {
                self.store.data_dir = value.to_string();
            }

            ["uploads", "max_bytes"] => {
                self.uploads.max_bytes = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid size value: {}", value)))?;
            }

            ["map", "center_lat"] => {
                self.map.center_lat = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid latitude value: {}", value)))?;
            }
            ["map", "center_lng"] => {
                self.map.center_lng = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid longitude value: {}", value)))?;
            }
            ["map", "zoom"] => {
                self.map.zoom = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid zoom value: {}", value)))?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "store.data_dir",
            "uploads.max_bytes",
            "map.center_lat",
            "map.center_lng",
            "map.zoom",
        ]
    }

    /// The effective data directory (config override or the XDG data dir)
    pub fn data_dir(&self) -> Result<PathBuf> {
        if self.store.data_dir.is_empty() {
            crate::store::SpotStore::data_dir()
        } else {
            Ok(PathBuf::from(&self.store.data_dir))
        }
    }

    /// Path of the spot store file
    pub fn spots_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(crate::constants::files::SPOTS_FILE_NAME))
    }

    /// Path of the user store file
    pub fn users_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(crate::constants::files::USERS_FILE_NAME))
    }

    /// Directory uploaded images are written to
    pub fn uploads_dir(&self) -> Result<PathBuf> {
        Ok(self
            .data_dir()?
            .join(crate::constants::files::UPLOADS_DIR_NAME))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.uploads.max_bytes, 8 * 1024 * 1024);
        assert_eq!(config.map.zoom, 13);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("server.port"), Some("3000".to_string()));

        config.set("server.port", "8080").unwrap();
        assert_eq!(config.get("server.port"), Some("8080".to_string()));

        config.set("map.center_lat", "51.5072").unwrap();
        assert_eq!(config.map.center_lat, 51.5072);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_number").is_err());
        assert!(config.set("map.zoom", "-1").is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.server.port, 3000);
        assert_eq!(loaded.map.center_lat, config.map.center_lat);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[server]"));
        assert!(toml.contains("[store]"));
        assert!(toml.contains("[uploads]"));
        assert!(toml.contains("[map]"));
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = Config::default();
        config.store.data_dir = "/tmp/spotlog-test".to_string();

        assert_eq!(
            config.spots_path().unwrap(),
            PathBuf::from("/tmp/spotlog-test/spots.json")
        );
        assert_eq!(
            config.uploads_dir().unwrap(),
            PathBuf::from("/tmp/spotlog-test/uploads")
        );
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        assert!(keys.contains(&"server.host"));
        assert!(keys.contains(&"store.data_dir"));
        assert!(keys.contains(&"map.zoom"));
    }
}
