/*!
 * Atrace Layer
 * Mirrors `tracing` spans and events into an atrace sink
 *
 * - span enter: Begin record, span fields as arguments
 * - span exit:  End record
 * - event:      Instant record named after the event message
 *
 * The span target is used as the category. Names, messages and field names
 * coming from `tracing` are not guaranteed delimiter-free, so they are
 * sanitized like argument values; field names also get `=` replaced with `:`
 * so the `name=value` split stays unambiguous.
 */

use crate::atrace::sanitize::{is_wire_safe, sanitize_value};
use crate::atrace::{AtraceSink, TraceArg, TraceEvent, TraceValue};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer writing to an [`AtraceSink`]
#[derive(Debug, Clone)]
pub struct AtraceLayer {
    sink: Arc<AtraceSink>,
}

impl AtraceLayer {
    pub fn new(sink: Arc<AtraceSink>) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &Arc<AtraceSink> {
        &self.sink
    }
}

/// Span fields captured at creation, stored in the span's extensions
#[derive(Debug, Default)]
struct FieldArgs {
    args: Vec<TraceArg<'static>>,
}

impl FieldArgs {
    fn put(&mut self, field: &Field, value: TraceValue<'static>) {
        let name = arg_label(field.name());
        match self.args.iter_mut().find(|arg| arg.name == name) {
            Some(existing) => existing.value = value,
            None => self.args.push(TraceArg::new(name, value)),
        }
    }

    /// Remove and return the event message, if it was recorded as text
    fn take_message(&mut self) -> Option<String> {
        let index = self.args.iter().position(|arg| {
            arg.name == "message" && matches!(arg.value, TraceValue::String(_))
        })?;
        match self.args.remove(index).value {
            TraceValue::String(text) => Some(text.into_owned()),
            _ => None,
        }
    }
}

impl Visit for FieldArgs {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, TraceValue::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, TraceValue::UInt(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, TraceValue::Bool(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, TraceValue::Double(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, TraceValue::String(Cow::Owned(value.to_string())));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, TraceValue::String(Cow::Owned(format!("{:?}", value))));
    }
}

#[inline]
fn wire_label(text: &str) -> Cow<'_, str> {
    if is_wire_safe(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(sanitize_value(text))
    }
}

/// Field names are `&'static str`, so the common clean case borrows
fn arg_label(name: &'static str) -> Cow<'static, str> {
    if is_wire_safe(name) && !name.contains('=') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(sanitize_value(name).replace('=', ":"))
    }
}

impl<S> Layer<S> for AtraceLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = FieldArgs::default();
        attrs.record(&mut fields);
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(fields) = extensions.get_mut::<FieldArgs>() {
            values.record(fields);
        }
    }

    fn on_enter(&self, id: &Id, ctx: Context<'_, S>) {
        if !self.sink.is_enabled() {
            return;
        }
        let Some(span) = ctx.span(id) else {
            return;
        };
        let metadata = span.metadata();
        let category = wire_label(metadata.target());
        let name = wire_label(metadata.name());

        let extensions = span.extensions();
        let args = extensions
            .get::<FieldArgs>()
            .map(|fields| fields.args.as_slice())
            .unwrap_or_default();
        self.sink
            .encode(&TraceEvent::begin(&category, &name).with_args(args));
    }

    fn on_exit(&self, id: &Id, ctx: Context<'_, S>) {
        if !self.sink.is_enabled() {
            return;
        }
        let Some(span) = ctx.span(id) else {
            return;
        };
        let metadata = span.metadata();
        let category = wire_label(metadata.target());
        let name = wire_label(metadata.name());
        self.sink.encode(&TraceEvent::end(&category, &name));
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !self.sink.is_enabled() {
            return;
        }
        let metadata = event.metadata();
        let mut fields = FieldArgs::default();
        event.record(&mut fields);

        let message = fields.take_message();
        let category = wire_label(metadata.target());
        let name = match &message {
            Some(message) => wire_label(message),
            None => wire_label(metadata.name()),
        };
        self.sink
            .encode(&TraceEvent::instant(&category, &name).with_args(&fields.args));
    }
}
