/*!
 * Monitoring
 * Process logging and the tracing-to-atrace bridge layer
 */

mod layer;
mod tracer;

pub use layer::AtraceLayer;
pub use tracer::{init_tracing, init_tracing_with_atrace, ENV_LOG_JSON};
