/// Application name
pub const APP_NAME: &str = "AgriSmart AI";

/// Tagline shown under the application name
pub const APP_TAGLINE: &str = "Intelligent Farming Assistant";

/// Application version
pub const APP_VERSION: &str = "0.1.0";

/// Application author
pub const APP_AUTHOR: &str = "Team Solution_Expert";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "agrismart.toml";

/// Default location of the persisted application state
pub const DEFAULT_STATE_FILE: &str = "state/persisted.json";

/// Default directory for queued offline changes
pub const DEFAULT_SYNC_QUEUE_DIR: &str = "state/sync-queue";

/// Default interval between offline sync ticks, in seconds
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;

/// Name of the notification service handle
pub const NOTIFICATION_SERVICE: &str = "notifications";

/// Name of the offline synchronization service handle
pub const OFFLINE_SYNC_SERVICE: &str = "offline-sync";

/// Default notification channel id
pub const DEFAULT_NOTIFICATION_CHANNEL: &str = "agrismart-alerts";

/// Message shown by the persistence gate while hydrating
pub const LOADING_MESSAGE: &str = "Loading AgriSmart AI...";

/// Title of the error boundary fallback view
pub const FALLBACK_TITLE: &str = "Something went wrong";

/// Body of the error boundary fallback view
pub const FALLBACK_MESSAGE: &str = "Please restart the app to continue.";
