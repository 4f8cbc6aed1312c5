/*!
 * Process Logging
 * Structured diagnostics for the bridge using the tracing crate
 *
 * Diagnostics (open failures, lifecycle transitions) go through `tracing`.
 * Trace records themselves never do; they are written straight to the
 * marker device by the sink.
 */

use super::layer::AtraceLayer;
use crate::atrace::AtraceSink;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable enabling JSON log output
pub const ENV_LOG_JSON: &str = "ATRACE_LOG_JSON";

/// Initialize structured logging
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - ATRACE_LOG_JSON: Enable JSON output (default: false)
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    install(None)
}

/// Initialize structured logging and mirror spans and events into `sink`
pub fn init_tracing_with_atrace(sink: Arc<AtraceSink>) -> bool {
    install(Some(AtraceLayer::new(sink)))
}

fn install(atrace: Option<AtraceLayer>) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter).with(atrace);

    let installed = if use_json() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        debug!(json = use_json(), "Structured logging initialized");
    }
    installed
}

fn use_json() -> bool {
    std::env::var(ENV_LOG_JSON)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
