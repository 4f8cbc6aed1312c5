/*!
 * Atrace Demo - Main Entry Point
 *
 * Emits a short synthetic workload to the kernel trace marker:
 * - direct Begin/End, Instant and Counter records
 * - `tracing` spans and events mirrored through the atrace layer
 *
 * Capture it with `atrace` / `perfetto` or by reading
 * /sys/kernel/debug/tracing/trace while it runs.
 */

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, info_span, warn};

use atrace_bridge::{init_tracing_with_atrace, AtraceConfig, AtraceSink, TraceArg};

const FRAMES: u64 = 5;

fn main() -> miette::Result<()> {
    let config = AtraceConfig::from_env()?;
    let sink = Arc::new(AtraceSink::new(&config));
    init_tracing_with_atrace(Arc::clone(&sink));

    info!(
        marker = %sink.marker_path().display(),
        pid = sink.pid(),
        format = ?sink.value_format(),
        "Atrace demo starting"
    );

    if !sink.enable() {
        warn!("Trace marker unavailable, records will be dropped");
    }

    let gfx = sink.register_category("gfx");
    info!(atrace = gfx.is_enabled_for_atrace(), "Category gfx registered");

    for frame in 0..FRAMES {
        let _frame = sink.scoped("gfx", "Frame");

        let args = [
            TraceArg::new("frame", frame),
            TraceArg::new("label", format!("frame {} of {}", frame + 1, FRAMES)),
        ];
        sink.instant("gfx", "Vsync", &args);

        {
            let span = info_span!("draw", frame);
            let _entered = span.enter();
            thread::sleep(Duration::from_millis(4));
            info!(layers = 3u64, "draw submitted");
        }

        let heap = [TraceArg::new("used", (frame as i64 + 1) * 1024)];
        sink.counter("mem", "Heap", &heap);
    }

    sink.disable();
    info!("Atrace demo finished");
    Ok(())
}
