/*!
 * Event Encoder
 * Renders trace events into marker records
 *
 * Record framing per phase:
 *
 * - Begin:   `B|<pid>|<name>[-<id>]|<k>=<v>;<k>=<v>|<category>`
 * - End:     same as Begin with tag `E`; the full detail keeps unmatched
 *            pairs diagnosable
 * - Instant: a Begin record followed by a separate `E` write
 * - Counter: one `C|<pid>|<name>-<arg>[-<id>]|<int>|<category>` per argument
 *
 * Any other phase produces nothing. Ids are lowercase hex.
 */

use super::device::MarkerDevice;
use super::event::{Phase, TraceEvent};
use super::format::ValueFormat;
use super::sanitize::{sanitize_tail, ARG_SEPARATOR, FIELD_SEPARATOR};
use crate::core::types::Pid;
use std::fmt::Write;

/// Record written after a Begin record to close an instant event
pub const INSTANT_END: &[u8] = b"E";

/// Produce every record for `event`, in write order, handing each to `emit`
pub fn for_each_record(
    pid: Pid,
    format: ValueFormat,
    event: &TraceEvent<'_>,
    mut emit: impl FnMut(&[u8]),
) {
    match event.phase {
        Phase::Begin => emit(frame_span('B', pid, format, event).as_bytes()),
        Phase::End => emit(frame_span('E', pid, format, event).as_bytes()),
        Phase::Instant => {
            emit(frame_span('B', pid, format, event).as_bytes());
            emit(INSTANT_END);
        }
        Phase::Counter => {
            for arg in event.args {
                let Some(value) = arg.value.as_counter() else {
                    debug_assert!(
                        false,
                        "counter {:?} argument {:?} holds a {} value, expected an integer",
                        event.name,
                        arg.name,
                        arg.value.kind()
                    );
                    continue;
                };

                let mut out = String::with_capacity(32 + event.name.len() + arg.name.len());
                let _ = write!(out, "C|{}|{}-{}", pid, event.name, arg.name);
                append_id(&mut out, event);
                let _ = write!(out, "|{}|{}", value, event.category);
                emit(out.as_bytes());
            }
        }
        Phase::Other(_) => {}
    }
}

/// Collect the records for `event` without writing them anywhere
pub fn encode_records(pid: Pid, format: ValueFormat, event: &TraceEvent<'_>) -> Vec<Vec<u8>> {
    let mut records = Vec::new();
    for_each_record(pid, format, event, |record| records.push(record.to_vec()));
    records
}

/// Write each record of `event` to `device`, one write call per record
///
/// Write failures are dropped; marker output is best-effort.
pub fn write_event(
    device: &dyn MarkerDevice,
    pid: Pid,
    format: ValueFormat,
    event: &TraceEvent<'_>,
) {
    for_each_record(pid, format, event, |record| {
        let _ = device.write_record(record);
    });
}

/// Begin/End framing shared by span-like phases
fn frame_span(tag: char, pid: Pid, format: ValueFormat, event: &TraceEvent<'_>) -> String {
    let mut out = String::with_capacity(64 + event.name.len() + event.category.len());
    let _ = write!(out, "{}|{}|{}", tag, pid, event.name);
    append_id(&mut out, event);
    out.push(FIELD_SEPARATOR);

    for (i, arg) in event.args.iter().enumerate() {
        if i > 0 {
            out.push(ARG_SEPARATOR);
        }
        out.push_str(&arg.name);
        out.push('=');
        let value_start = out.len();
        format.append(&arg.value, &mut out);
        sanitize_tail(&mut out, value_start);
    }

    out.push(FIELD_SEPARATOR);
    out.push_str(event.category);
    out
}

#[inline]
fn append_id(out: &mut String, event: &TraceEvent<'_>) {
    if let Some(id) = event.scoped_id() {
        let _ = write!(out, "-{:x}", id);
    }
}
