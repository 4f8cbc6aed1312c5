/*!
 * Delimiter Safety Tests
 */

use atrace_bridge::atrace::encode_records;
use atrace_bridge::atrace::sanitize::sanitize_value;
use atrace_bridge::{TraceArg, TraceEvent, ValueFormat};
use proptest::prelude::*;

fn hostile_value() -> impl Strategy<Value = String> {
    "[a-z\";|\\\\= ]{0,24}"
}

proptest! {
    #[test]
    fn sanitized_value_has_no_delimiters(value in hostile_value()) {
        let sanitized = sanitize_value(&value);
        prop_assert!(!sanitized.contains(';'));
        prop_assert!(!sanitized.contains('|'));
        prop_assert!(!sanitized.contains('"'));
    }

    #[test]
    fn record_fields_survive_hostile_values(
        category in "[a-z]{1,8}",
        name in "[A-Za-z]{1,8}",
        id in proptest::option::of(any::<u64>()),
        arg_names in proptest::collection::vec("[a-z]{1,6}", 0..5),
        format in prop_oneof![Just(ValueFormat::Plain), Just(ValueFormat::Json)],
        values in proptest::collection::vec(hostile_value(), 5),
    ) {
        let args: Vec<TraceArg<'_>> = arg_names
            .iter()
            .zip(values.iter())
            .map(|(n, v)| TraceArg::new(n.as_str(), v.as_str()))
            .collect();
        let mut event = TraceEvent::begin(&category, &name).with_args(&args);
        if let Some(id) = id {
            event = event.with_id(id);
        }

        let records = encode_records(1, format, &event);
        prop_assert_eq!(records.len(), 1);
        let record = String::from_utf8(records[0].clone()).unwrap();

        let fields: Vec<&str> = record.split('|').collect();
        prop_assert_eq!(fields.len(), 5);
        prop_assert_eq!(fields[0], "B");
        prop_assert_eq!(fields[1], "1");
        prop_assert_eq!(fields[4], category.as_str());

        match id {
            Some(id) => prop_assert_eq!(fields[2].to_string(), format!("{}-{:x}", name, id)),
            None => prop_assert_eq!(fields[2], name.as_str()),
        }

        let parsed_names: Vec<&str> = if fields[3].is_empty() {
            Vec::new()
        } else {
            fields[3]
                .split(';')
                .map(|arg| arg.split_once('=').map(|(n, _)| n).unwrap_or(arg))
                .collect()
        };
        let expected: Vec<&str> = args.iter().map(|a| a.name.as_ref()).collect();
        prop_assert_eq!(parsed_names, expected);
    }
}

#[test]
fn test_escaped_quote_priority() {
    // `\"` must become an apostrophe instead of losing the quote first
    assert_eq!(sanitize_value("\\\""), "'");
    assert_eq!(sanitize_value("\"\\\"\""), "'");
}

#[test]
fn test_only_value_span_rewritten() {
    let args = [TraceArg::new("a", ";"), TraceArg::new("b", "|")];
    let event = TraceEvent::begin("cat", "name").with_args(&args);
    let records = encode_records(5, ValueFormat::Plain, &event);
    assert_eq!(records, vec![b"B|5|name|a=,;b=!|cat".to_vec()]);
}
