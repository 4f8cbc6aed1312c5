/*!
 * Value Formatting
 * Converts typed argument values to text before sanitization
 */

use super::event::TraceValue;
use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

/// Rendering applied to argument values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// Strings verbatim, numbers in decimal, pointers as `0x` hex
    #[default]
    Plain,
    /// Same text the JSON trace export produces (quoted, escaped strings)
    Json,
}

impl ValueFormat {
    /// Append the textual form of `value` to `out`
    pub fn append(self, value: &TraceValue<'_>, out: &mut String) {
        match (self, value) {
            (_, TraceValue::Bool(v)) => out.push_str(if *v { "true" } else { "false" }),
            (_, TraceValue::UInt(v)) => {
                let _ = write!(out, "{}", v);
            }
            (_, TraceValue::Int(v)) => {
                let _ = write!(out, "{}", v);
            }
            (ValueFormat::Plain, TraceValue::Double(v)) => {
                let _ = write!(out, "{}", v);
            }
            (ValueFormat::Json, TraceValue::Double(v)) => append_json_double(*v, out),
            (ValueFormat::Plain, TraceValue::Pointer(p)) => {
                let _ = write!(out, "0x{:x}", p);
            }
            (ValueFormat::Json, TraceValue::Pointer(p)) => {
                let _ = write!(out, "\"0x{:x}\"", p);
            }
            (ValueFormat::Plain, TraceValue::String(s)) => out.push_str(s),
            (ValueFormat::Json, TraceValue::String(s)) => match serde_json::to_string(s.as_ref()) {
                Ok(json) => out.push_str(&json),
                Err(_) => {
                    out.push('"');
                    out.push_str(s);
                    out.push('"');
                }
            },
        }
    }

    /// Textual form of `value` as a new string
    pub fn render(self, value: &TraceValue<'_>) -> String {
        let mut out = String::new();
        self.append(value, &mut out);
        out
    }
}

/// JSON has no literal for non-finite numbers, so those go out as strings
fn append_json_double(v: f64, out: &mut String) {
    if v.is_nan() {
        out.push_str("\"NaN\"");
    } else if v.is_infinite() {
        out.push_str(if v.is_sign_positive() { "\"Infinity\"" } else { "\"-Infinity\"" });
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        let _ = write!(out, "{:.1}", v);
    } else {
        let _ = write!(out, "{}", v);
    }
}

impl FromStr for ValueFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "" => Ok(ValueFormat::Plain),
            "json" => Ok(ValueFormat::Json),
            _ => Err(ConfigError::InvalidValueFormat(s.to_string())),
        }
    }
}
