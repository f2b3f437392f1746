//! Concrete background services started at launch.
//!
//! Only their lifecycle contract matters to the bootstrap core; delivery
//! and synchronization internals stay deliberately thin.
pub mod notification;
pub mod offline_sync;

pub use notification::{LocalNotification, NotificationService};
pub use offline_sync::OfflineSyncService;
