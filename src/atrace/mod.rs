/*!
 * Atrace Bridge
 * Delivers trace events to the kernel trace_marker file
 *
 * - [`event`]: borrowed event descriptors
 * - [`format`] and [`sanitize`]: value rendering and delimiter escaping
 * - [`encoder`]: phase-specific record framing
 * - [`device`]: the write-only marker device
 * - [`sink`]: handle lifecycle, shared lock and enablement propagation
 * - [`category`]: per-category enabled flags
 */

pub mod category;
pub mod device;
pub mod encoder;
pub mod event;
pub mod format;
pub mod sanitize;
pub mod scoped;
pub mod sink;

pub use category::{Category, CategoryFlags, CategoryRegistry};
pub use device::{DeviceOpener, MarkerDevice, MarkerFile};
pub use encoder::{encode_records, write_event};
pub use event::{CounterValue, EventFlags, Phase, TraceArg, TraceEvent, TraceValue};
pub use format::ValueFormat;
pub use sanitize::sanitize_value;
pub use scoped::ScopedTrace;
pub use sink::{AtraceLock, AtraceSink};
