//! # AgriSmart Core Kernel Errors
//!
//! Defines the error types shared by the bootstrap kernel.
//!
//! [`Error`] is the primary enum. It covers service initialization and
//! cleanup failures, lifecycle precondition violations of the
//! [`BootstrapOrchestrator`](crate::kernel::bootstrap::BootstrapOrchestrator),
//! and wraps the typed errors of the storage and render subsystems.
use std::path::PathBuf;
use std::result::Result as StdResult;

use crate::boundary::RenderError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Error type for the AgriSmart bootstrap core
#[derive(Debug, ThisError)]
pub enum Error {
    /// A lifecycle operation was called out of order (e.g. mounting twice).
    #[error("Kernel lifecycle error during {phase}: {message}")]
    KernelLifecycleError {
        phase: KernelLifecyclePhase,
        service_name: Option<String>,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// A service's `initialize` returned a failure.
    #[error("Service '{service}' failed to initialize: {message}")]
    ServiceInitialization { service: String, message: String },

    /// A service's `initialize` did not settle within the configured bound.
    #[error("Service '{service}' did not finish initializing within {timeout_ms}ms")]
    InitializationTimeout { service: String, timeout_ms: u64 },

    /// A service's `cleanup` returned a failure.
    #[error("Service '{service}' failed to clean up: {message}")]
    ServiceCleanup { service: String, message: String },

    /// Platform splash dismissal failed.
    #[error("Splash dismissal failed: {0}")]
    Splash(String),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Failure raised while rendering the view tree
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase of the bootstrap lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum KernelLifecyclePhase {
    #[error("Mount")]
    Mount,
    #[error("Initialize")]
    Initialize,
    #[error("SplashHide")]
    SplashHide,
    #[error("Unmount")]
    Unmount,
    #[error("Cleanup")]
    Cleanup,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl Error {
    /// Wraps an I/O failure with the operation and path it happened on.
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        })
    }

    /// Builds a lifecycle precondition error without a source.
    pub fn lifecycle(phase: KernelLifecyclePhase, message: impl Into<String>) -> Self {
        Error::KernelLifecycleError {
            phase,
            service_name: None,
            message: message.into(),
            source: None,
        }
    }

    /// Builds an initialization failure for the named service.
    pub fn init_failed(service: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ServiceInitialization {
            service: service.into(),
            message: message.into(),
        }
    }
}
