//! # AgriSmart Core Storage Errors
//!
//! Defines error types for configuration loading and persisted state I/O.
//!
//! [`StorageSystemError`] covers file I/O with path context, format
//! detection, and (de)serialization failures for every supported format.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization to '{format}' failed: {source}")]
    SerializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported configuration format for path: {0}")]
    UnsupportedConfigFormat(PathBuf),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidConfigValue { key: String, reason: String },

    #[error("Persisted state at '{path}' is not a JSON object")]
    StateNotAnObject { path: PathBuf },
}

impl StorageSystemError {
    pub(crate) fn serialization(format: &str, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        StorageSystemError::SerializationError { format: format.to_string(), source: Box::new(source) }
    }

    pub(crate) fn deserialization(format: &str, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        StorageSystemError::DeserializationError { format: format.to_string(), source: Box::new(source) }
    }
}
