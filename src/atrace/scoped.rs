/*!
 * Scoped Traces
 * RAII guard pairing a Begin record with its End
 */

use super::event::{TraceArg, TraceEvent};
use super::sink::AtraceSink;
use crate::core::types::TraceId;

/// Emits Begin on creation and the matching End on drop
///
/// # Example
///
/// ```ignore
/// let _span = sink.scoped("gfx", "Draw");
/// // ... work ...
/// // End record written here
/// ```
#[must_use = "the span ends as soon as the guard is dropped"]
pub struct ScopedTrace<'a> {
    sink: &'a AtraceSink,
    category: &'a str,
    name: &'a str,
    id: Option<TraceId>,
}

impl<'a> ScopedTrace<'a> {
    pub fn new(
        sink: &'a AtraceSink,
        category: &'a str,
        name: &'a str,
        args: &[TraceArg<'_>],
    ) -> Self {
        sink.encode(&TraceEvent::begin(category, name).with_args(args));
        Self {
            sink,
            category,
            name,
            id: None,
        }
    }

    /// Begin a span carrying a scoping id, repeated on the End record
    pub fn with_id(
        sink: &'a AtraceSink,
        category: &'a str,
        name: &'a str,
        id: TraceId,
        args: &[TraceArg<'_>],
    ) -> Self {
        sink.encode(&TraceEvent::begin(category, name).with_id(id).with_args(args));
        Self {
            sink,
            category,
            name,
            id: Some(id),
        }
    }
}

impl Drop for ScopedTrace<'_> {
    fn drop(&mut self) {
        let event = TraceEvent::end(self.category, self.name);
        let event = match self.id {
            Some(id) => event.with_id(id),
            None => event,
        };
        self.sink.encode(&event);
    }
}
