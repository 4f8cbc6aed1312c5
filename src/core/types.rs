/*!
 * Core Types
 * Common types used across the bridge
 */

/// Process ID type
pub type Pid = u32;

/// Scoping identifier correlating related events (async spans, flows)
pub type TraceId = u64;

/// Default marker file on kernels exposing ftrace through debugfs
pub const DEBUGFS_TRACE_MARKER: &str = "/sys/kernel/debug/tracing/trace_marker";

/// Marker file on kernels mounting tracefs directly
pub const TRACEFS_TRACE_MARKER: &str = "/sys/kernel/tracing/trace_marker";

/// Process ID of the current process
#[inline]
pub fn current_pid() -> Pid {
    std::process::id()
}
