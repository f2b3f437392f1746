//! # AgriSmart Lifecycle Events
//!
//! In-process reporting channel for the bootstrap lifecycle. The orchestrator
//! publishes a [`LifecycleEvent`] for every phase change, service outcome,
//! splash dismissal and cleanup result; observers register handlers on a
//! [`SharedEventDispatcher`].
pub mod dispatcher;
pub mod types;

/// Type for handler identifiers
pub type EventId = u64;

/// Result of event processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was processed successfully and propagation should continue
    Continue,
    /// Event was processed and propagation should stop
    Stop,
}

/// Re-export important types
pub use dispatcher::{EventDispatcher, SharedEventDispatcher, EventHandler, create_dispatcher};
pub use types::LifecycleEvent;
