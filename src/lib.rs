/*!
 * Atrace Bridge Library
 * Converts structured trace events into kernel trace_marker records
 */

pub mod atrace;
pub mod core;
pub mod monitoring;

// Re-exports
pub use crate::atrace::{
    AtraceLock, AtraceSink, Category, CategoryFlags, EventFlags, Phase, ScopedTrace, TraceArg,
    TraceEvent, TraceValue, ValueFormat,
};
pub use crate::core::{AtraceConfig, AtraceError, AtraceResult, ConfigError, Pid};
pub use monitoring::{init_tracing, init_tracing_with_atrace, AtraceLayer};
