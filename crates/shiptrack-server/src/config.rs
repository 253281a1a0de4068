// Configuration module
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Main server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub carrier: CarrierSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 0 means one worker per CPU core
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

/// Which physical store backs the shipment collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendKind {
    Memory,
    JsonFile,
    RocksDb,
    Gist,
}

impl StorageBackendKind {
    pub const VALID_NAMES: [&'static str; 4] = ["memory", "json-file", "rocksdb", "gist"];
}

impl FromStr for StorageBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "json-file" => Ok(Self::JsonFile),
            "rocksdb" => Ok(Self::RocksDb),
            "gist" => Ok(Self::Gist),
            other => Err(format!(
                "Unknown storage backend '{}'. Must be one of: {}",
                other,
                Self::VALID_NAMES.join(", ")
            )),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Path of the JSON document for the json-file backend
    #[serde(default = "default_file_path")]
    pub file_path: String,
    /// Database directory for the rocksdb backend
    #[serde(default = "default_rocksdb_path")]
    pub rocksdb_path: String,
    #[serde(default)]
    pub gist: GistSettings,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            file_path: default_file_path(),
            rocksdb_path: default_rocksdb_path(),
            gist: GistSettings::default(),
        }
    }
}

/// Gist backend settings. The token normally arrives via the
/// SHIPTRACK_GIST_TOKEN environment variable rather than the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistSettings {
    #[serde(default)]
    pub gist_id: String,
    #[serde(default = "default_gist_file")]
    pub file_name: String,
    #[serde(default)]
    pub token: String,
}

impl Default for GistSettings {
    fn default() -> Self {
        Self {
            gist_id: String::new(),
            file_name: default_gist_file(),
            token: String::new(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: default_log_file(),
            log_to_console: true,
            format: default_log_format(),
        }
    }
}

/// Carrier-lookup settings. The API key normally arrives via the
/// SHIPTRACK_CARRIER_API_KEY environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_carrier_base_url")]
    pub base_url: String,
}

impl Default for CarrierSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_carrier_base_url(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_backend() -> String {
    "json-file".to_string()
}

fn default_file_path() -> String {
    "./data/shipments.json".to_string()
}

fn default_rocksdb_path() -> String {
    "./data/shiptrack_db".to_string()
}

fn default_gist_file() -> String {
    "shipments.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "./logs/shiptrack.log".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_carrier_base_url() -> String {
    shiptrack_carrier::CarrierConfig::DEFAULT_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Note: Environment overrides are applied separately via
    /// `apply_env_overrides()`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    /// Apply environment-variable overrides. Secrets live in the
    /// environment so config.toml can be committed.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("SHIPTRACK_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(token) = std::env::var("SHIPTRACK_GIST_TOKEN") {
            self.storage.gist.token = token;
        }
        if let Ok(key) = std::env::var("SHIPTRACK_CARRIER_API_KEY") {
            self.carrier.api_key = Some(key);
        }
    }

    /// The parsed storage backend selection.
    pub fn backend_kind(&self) -> anyhow::Result<StorageBackendKind> {
        self.storage
            .backend
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
    }

    /// Validate configuration settings. Call after `apply_env_overrides`.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        let kind = self.backend_kind()?;
        if kind == StorageBackendKind::Gist {
            if self.storage.gist.gist_id.is_empty() {
                return Err(anyhow::anyhow!(
                    "storage.gist.gist_id is required for the gist backend"
                ));
            }
            if self.storage.gist.token.is_empty() {
                return Err(anyhow::anyhow!(
                    "Gist token is required for the gist backend (set SHIPTRACK_GIST_TOKEN)"
                ));
            }
        }

        Ok(())
    }
}
