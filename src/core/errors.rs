/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors raised while reading settings from the environment
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid pid override: {0:?}")]
    #[diagnostic(
        code(config::invalid_pid),
        help("ATRACE_PID must be a non-negative 32-bit integer.")
    )]
    InvalidPid(String),

    #[error("Invalid value format: {0:?}")]
    #[diagnostic(
        code(config::invalid_value_format),
        help("ATRACE_VALUE_FORMAT must be either \"plain\" or \"json\".")
    )]
    InvalidValueFormat(String),
}

/// Errors surfaced by the atrace sink
///
/// The encode path never returns these; only explicit lifecycle calls do.
#[derive(Error, Debug, Diagnostic)]
pub enum AtraceError {
    #[error("Couldn't open {}: {source}", .path.display())]
    #[diagnostic(
        code(atrace::device_open),
        help("Check that tracefs/debugfs is mounted and the marker file is writable.")
    )]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for atrace lifecycle operations
pub type AtraceResult<T> = std::result::Result<T, AtraceError>;
