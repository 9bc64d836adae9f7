//! Error types for the edges of the crate
//!
//! The playback engine itself never fails: invalid transport calls are
//! ignored and out-of-range seeks clamp. Errors only arise where outside
//! input enters the system: algorithm lookup, command-line operation
//! strings, and configuration files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while selecting or preparing a trace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// No producer is registered under this identifier
    #[error("unknown algorithm '{id}' (available: {available})")]
    UnknownAlgorithm { id: String, available: String },

    /// An operation string such as `insert:42` could not be parsed
    #[error("invalid operation '{input}': {reason}")]
    InvalidOperation { input: String, reason: String },
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value was syntactically fine but outside its allowed range
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level error for the `algotrace` binary
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode trace: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to install logger: {0}")]
    Logging(String),
}
