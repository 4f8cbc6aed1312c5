/*!
 * Environment Configuration Tests
 */

use atrace_bridge::core::config::{ENV_MARKER_PATH, ENV_PID, ENV_VALUE_FORMAT};
use atrace_bridge::core::DEBUGFS_TRACE_MARKER;
use atrace_bridge::{AtraceConfig, ConfigError, ValueFormat};
use serial_test::serial;
use std::path::PathBuf;

fn clear_env() {
    std::env::remove_var(ENV_MARKER_PATH);
    std::env::remove_var(ENV_PID);
    std::env::remove_var(ENV_VALUE_FORMAT);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = AtraceConfig::from_env().unwrap();
    assert_eq!(config, AtraceConfig::default());
    assert_eq!(config.marker_path, PathBuf::from(DEBUGFS_TRACE_MARKER));
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(ENV_MARKER_PATH, "/tmp/marker");
    std::env::set_var(ENV_PID, "4242");
    std::env::set_var(ENV_VALUE_FORMAT, "JSON");

    let config = AtraceConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.marker_path, PathBuf::from("/tmp/marker"));
    assert_eq!(config.effective_pid(), 4242);
    assert_eq!(config.value_format, ValueFormat::Json);
}

#[test]
#[serial]
fn test_from_env_rejects_bad_pid() {
    clear_env();
    std::env::set_var(ENV_PID, "-1");
    let result = AtraceConfig::from_env();
    clear_env();

    assert_eq!(result, Err(ConfigError::InvalidPid("-1".into())));
}

#[test]
#[serial]
fn test_from_env_rejects_bad_format() {
    clear_env();
    std::env::set_var(ENV_VALUE_FORMAT, "xml");
    let result = AtraceConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::InvalidValueFormat(_))));
}
