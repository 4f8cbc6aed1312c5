/*!
 * Bridge Configuration
 *
 * Runtime configuration for the marker device and record rendering
 */

use super::errors::ConfigError;
use super::types::{current_pid, Pid, DEBUGFS_TRACE_MARKER, TRACEFS_TRACE_MARKER};
use crate::atrace::ValueFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the marker file path
pub const ENV_MARKER_PATH: &str = "ATRACE_MARKER_PATH";
/// Environment variable overriding the pid written into records
pub const ENV_PID: &str = "ATRACE_PID";
/// Environment variable selecting the argument value format
pub const ENV_VALUE_FORMAT: &str = "ATRACE_VALUE_FORMAT";

/// Atrace sink configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtraceConfig {
    /// Write-only marker file the records are delivered to
    pub marker_path: PathBuf,
    /// Pid written into every record; `None` uses the current process
    pub pid: Option<Pid>,
    /// How argument values are rendered before sanitization
    pub value_format: ValueFormat,
}

impl Default for AtraceConfig {
    fn default() -> Self {
        Self {
            marker_path: PathBuf::from(DEBUGFS_TRACE_MARKER),
            pid: None,
            value_format: ValueFormat::Plain,
        }
    }
}

impl AtraceConfig {
    /// Configuration targeting a directly mounted tracefs
    pub fn tracefs() -> Self {
        Self {
            marker_path: PathBuf::from(TRACEFS_TRACE_MARKER),
            ..Default::default()
        }
    }

    /// Configuration writing to an arbitrary path
    pub fn with_marker_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.marker_path = path.into();
        self
    }

    /// Override the pid written into records
    pub fn with_pid(mut self, pid: Pid) -> Self {
        self.pid = Some(pid);
        self
    }

    /// Select the argument value format
    pub fn with_value_format(mut self, format: ValueFormat) -> Self {
        self.value_format = format;
        self
    }

    /// Load configuration from the environment
    ///
    /// Environment variables:
    /// - ATRACE_MARKER_PATH: marker file (default: debugfs trace_marker)
    /// - ATRACE_PID: pid override (default: current process)
    /// - ATRACE_VALUE_FORMAT: `plain` or `json` (default: plain)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var(ENV_MARKER_PATH) {
            if !path.is_empty() {
                config.marker_path = PathBuf::from(path);
            }
        }

        if let Ok(pid) = std::env::var(ENV_PID) {
            let parsed = pid
                .trim()
                .parse::<Pid>()
                .map_err(|_| ConfigError::InvalidPid(pid.clone()))?;
            config.pid = Some(parsed);
        }

        if let Ok(format) = std::env::var(ENV_VALUE_FORMAT) {
            config.value_format = format.parse()?;
        }

        Ok(config)
    }

    /// Pid records are stamped with
    #[inline]
    pub fn effective_pid(&self) -> Pid {
        self.pid.unwrap_or_else(current_pid)
    }
}
