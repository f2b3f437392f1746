pub mod config;
pub mod error;
pub mod local;

/// Re-export key types
pub use config::{
    AppConfig, ConfigFormat, Platform, SplashConfig, BootstrapConfig,
    PersistenceConfig, NotificationConfig, OfflineSyncConfig, LoggingConfig,
};
pub use error::StorageSystemError;
pub use local::FileStateStore;
