use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::kernel::bootstrap::{BootstrapOptions, InitStrategy};
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::storage::error::StorageSystemError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }

    /// Determine format from a name such as `"toml"` or `"yml"`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            #[cfg(feature = "toml-config")]
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Target platform. Only mobile platforms have a launch splash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Web,
    #[default]
    Headless,
}

impl Platform {
    pub fn has_splash(&self) -> bool {
        matches!(self, Platform::Android | Platform::Ios)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    pub enabled: bool,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub strategy: InitStrategy,
    /// Per-service initialization bound in milliseconds; unset waits forever
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_timeout_ms: Option<u64>,
}

impl From<&BootstrapConfig> for BootstrapOptions {
    fn from(config: &BootstrapConfig) -> Self {
        BootstrapOptions {
            strategy: config.strategy,
            init_timeout: config.init_timeout_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub state_file: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { state_file: PathBuf::from(constants::DEFAULT_STATE_FILE) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub channel_id: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channel_id: constants::DEFAULT_NOTIFICATION_CHANNEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineSyncConfig {
    pub queue_dir: PathBuf,
    pub interval_secs: u64,
}

impl Default for OfflineSyncConfig {
    fn default() -> Self {
        Self {
            queue_dir: PathBuf::from(constants::DEFAULT_SYNC_QUEUE_DIR),
            interval_secs: constants::DEFAULT_SYNC_INTERVAL_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Application configuration. Every section is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub platform: Platform,
    pub splash: SplashConfig,
    pub bootstrap: BootstrapConfig,
    pub persistence: PersistenceConfig,
    pub notifications: NotificationConfig,
    pub offline_sync: OfflineSyncConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load a configuration file, detecting the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| StorageSystemError::UnsupportedConfigFormat(path.to_path_buf()))?;
        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::io(e, "read_config", path.to_path_buf()))?;
        let config = Self::deserialize(&data, format)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                log::info!("No configuration at {}; using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String> {
        let out = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| StorageSystemError::serialization("json", e))?,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(self)
                .map_err(|e| StorageSystemError::serialization("yaml", e))?,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| StorageSystemError::serialization("toml", e))?,
        };
        Ok(out)
    }

    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(data)
                .map_err(|e| StorageSystemError::deserialization("json", e))?,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|e| StorageSystemError::deserialization("yaml", e))?,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data)
                .map_err(|e| StorageSystemError::deserialization("toml", e))?,
        };
        Ok(config)
    }

    /// Reject values the services cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.notifications.enabled && self.notifications.channel_id.trim().is_empty() {
            return Err(StorageSystemError::InvalidConfigValue {
                key: "notifications.channel_id".to_string(),
                reason: "must not be empty when notifications are enabled".to_string(),
            }
            .into());
        }
        if self.offline_sync.interval_secs == 0 {
            return Err(StorageSystemError::InvalidConfigValue {
                key: "offline_sync.interval_secs".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.bootstrap.init_timeout_ms == Some(0) {
            return Err(StorageSystemError::InvalidConfigValue {
                key: "bootstrap.init_timeout_ms".to_string(),
                reason: "must be positive; omit it to wait indefinitely".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions::from(&self.bootstrap)
    }

    /// Whether the launch splash should be driven on this platform.
    pub fn splash_active(&self) -> bool {
        self.splash.enabled && self.platform.has_splash()
    }
}
