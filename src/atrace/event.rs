/*!
 * Trace Events
 * Borrowed event descriptors handed to the encoder by producers
 */

use crate::core::types::TraceId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Event phase, determines how an event is framed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Begin,
    End,
    Instant,
    Counter,
    /// Any other phase of the recording subsystem; never written to the marker
    Other(char),
}

impl Phase {
    /// Map a Chrome trace-event phase character
    pub const fn from_char(c: char) -> Self {
        match c {
            'B' => Phase::Begin,
            'E' => Phase::End,
            'I' => Phase::Instant,
            'C' => Phase::Counter,
            other => Phase::Other(other),
        }
    }

    /// Chrome trace-event phase character
    pub const fn as_char(self) -> char {
        match self {
            Phase::Begin => 'B',
            Phase::End => 'E',
            Phase::Instant => 'I',
            Phase::Counter => 'C',
            Phase::Other(c) => c,
        }
    }
}

impl From<char> for Phase {
    fn from(c: char) -> Self {
        Phase::from_char(c)
    }
}

/// Event flag bits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventFlags(u8);

impl EventFlags {
    pub const NONE: EventFlags = EventFlags(0);
    /// Set when the event's `id` is meaningful
    pub const HAS_ID: EventFlags = EventFlags(1 << 0);
    /// Set when the recording subsystem copied the event's strings
    pub const COPY: EventFlags = EventFlags(1 << 1);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        EventFlags(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: EventFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: EventFlags) -> Self {
        EventFlags(self.0 | other.0)
    }
}

impl std::ops::BitOr for EventFlags {
    type Output = EventFlags;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Typed argument value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TraceValue<'a> {
    Bool(bool),
    #[serde(rename = "uint")]
    UInt(u64),
    Int(i64),
    Double(f64),
    Pointer(usize),
    String(Cow<'a, str>),
}

impl TraceValue<'_> {
    /// Integer payload, the only kind counters accept
    #[inline]
    pub fn as_counter(&self) -> Option<CounterValue> {
        match *self {
            TraceValue::Int(v) => Some(CounterValue::Signed(v)),
            TraceValue::UInt(v) => Some(CounterValue::Unsigned(v)),
            _ => None,
        }
    }

    /// Short name of the value kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            TraceValue::Bool(_) => "bool",
            TraceValue::UInt(_) => "uint",
            TraceValue::Int(_) => "int",
            TraceValue::Double(_) => "double",
            TraceValue::Pointer(_) => "pointer",
            TraceValue::String(_) => "string",
        }
    }
}

/// Integer value carried by a counter argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterValue {
    Signed(i64),
    Unsigned(u64),
}

impl std::fmt::Display for CounterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterValue::Signed(v) => write!(f, "{}", v),
            CounterValue::Unsigned(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for TraceValue<'_> {
    fn from(v: bool) -> Self {
        TraceValue::Bool(v)
    }
}

impl From<u64> for TraceValue<'_> {
    fn from(v: u64) -> Self {
        TraceValue::UInt(v)
    }
}

impl From<u32> for TraceValue<'_> {
    fn from(v: u32) -> Self {
        TraceValue::UInt(u64::from(v))
    }
}

impl From<i64> for TraceValue<'_> {
    fn from(v: i64) -> Self {
        TraceValue::Int(v)
    }
}

impl From<i32> for TraceValue<'_> {
    fn from(v: i32) -> Self {
        TraceValue::Int(i64::from(v))
    }
}

impl From<f64> for TraceValue<'_> {
    fn from(v: f64) -> Self {
        TraceValue::Double(v)
    }
}

impl<'a> From<&'a str> for TraceValue<'a> {
    fn from(v: &'a str) -> Self {
        TraceValue::String(Cow::Borrowed(v))
    }
}

impl From<String> for TraceValue<'_> {
    fn from(v: String) -> Self {
        TraceValue::String(Cow::Owned(v))
    }
}

/// Named argument attached to an event
///
/// Names are delimiter-free by caller contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceArg<'a> {
    pub name: Cow<'a, str>,
    pub value: TraceValue<'a>,
}

impl<'a> TraceArg<'a> {
    pub fn new(name: impl Into<Cow<'a, str>>, value: impl Into<TraceValue<'a>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Event descriptor, borrowed for the duration of one encode call
///
/// `category` and `name` must not contain `|` or `;`; argument values may
/// contain anything and are sanitized on the way out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceEvent<'a> {
    pub phase: Phase,
    pub category: &'a str,
    pub name: &'a str,
    pub id: TraceId,
    pub args: &'a [TraceArg<'a>],
    pub flags: EventFlags,
}

impl<'a> TraceEvent<'a> {
    pub fn new(phase: Phase, category: &'a str, name: &'a str) -> Self {
        Self {
            phase,
            category,
            name,
            id: 0,
            args: &[],
            flags: EventFlags::NONE,
        }
    }

    pub fn begin(category: &'a str, name: &'a str) -> Self {
        Self::new(Phase::Begin, category, name)
    }

    pub fn end(category: &'a str, name: &'a str) -> Self {
        Self::new(Phase::End, category, name)
    }

    pub fn instant(category: &'a str, name: &'a str) -> Self {
        Self::new(Phase::Instant, category, name)
    }

    pub fn counter(category: &'a str, name: &'a str) -> Self {
        Self::new(Phase::Counter, category, name)
    }

    /// Attach a scoping id and set [`EventFlags::HAS_ID`]
    pub fn with_id(mut self, id: TraceId) -> Self {
        self.id = id;
        self.flags = self.flags | EventFlags::HAS_ID;
        self
    }

    pub fn with_args(mut self, args: &'a [TraceArg<'a>]) -> Self {
        self.args = args;
        self
    }

    pub fn with_flags(mut self, flags: EventFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Scoping id, if the event carries one
    #[inline]
    pub fn scoped_id(&self) -> Option<TraceId> {
        self.flags.contains(EventFlags::HAS_ID).then_some(self.id)
    }
}
