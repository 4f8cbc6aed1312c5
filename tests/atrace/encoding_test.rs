/*!
 * Record Framing Tests
 */

use super::common::{enabled_sink, memory_sink, TEST_PID};
use atrace_bridge::atrace::encode_records;
use atrace_bridge::{AtraceConfig, EventFlags, Phase, TraceArg, TraceEvent, ValueFormat};
use pretty_assertions::assert_eq;

#[test]
fn test_begin_scenario() {
    let (sink, recorded) = enabled_sink();
    let args = [TraceArg::new("x", 5i64), TraceArg::new("label", "a\"b;c|d")];

    sink.encode(&TraceEvent::begin("gfx", "Draw").with_args(&args));

    assert_eq!(recorded.records(), vec!["B|100|Draw|x=5;label=ab,c!d|gfx"]);
}

#[test]
fn test_counter_scenario() {
    let args = [TraceArg::new("used", 2048i64)];
    let event = TraceEvent::counter("mem", "Heap").with_id(0x10).with_args(&args);

    let records = encode_records(7, ValueFormat::Plain, &event);

    assert_eq!(records, vec![b"C|7|Heap-used-10|2048|mem".to_vec()]);
}

#[test]
fn test_begin_yields_one_b_record() {
    let (sink, recorded) = enabled_sink();
    sink.encode(&TraceEvent::begin("c", "n"));
    let records = recorded.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].starts_with('B'));
}

#[test]
fn test_end_yields_one_detailed_e_record() {
    let (sink, recorded) = enabled_sink();
    let args = [TraceArg::new("bytes", 512u64)];
    sink.encode(&TraceEvent::end("io", "Read").with_args(&args));
    assert_eq!(recorded.records(), vec!["E|100|Read|bytes=512|io"]);
}

#[test]
fn test_instant_yields_two_writes() {
    let (sink, recorded) = enabled_sink();
    let args = [TraceArg::new("key", "enter")];
    sink.encode(&TraceEvent::instant("input", "Key").with_args(&args));
    assert_eq!(recorded.records(), vec!["B|100|Key|key=enter|input", "E"]);
}

#[test]
fn test_counter_yields_one_record_per_argument() {
    let (sink, recorded) = enabled_sink();
    let args = [
        TraceArg::new("a", 1i64),
        TraceArg::new("b", -2i64),
        TraceArg::new("c", 3u64),
    ];
    sink.encode(&TraceEvent::counter("stats", "Queue").with_args(&args));

    assert_eq!(
        recorded.records(),
        vec![
            "C|100|Queue-a|1|stats",
            "C|100|Queue-b|-2|stats",
            "C|100|Queue-c|3|stats",
        ]
    );
}

#[test]
fn test_id_suffix_is_lowercase_hex() {
    let event = TraceEvent::begin("async", "Load").with_id(0x2A);
    let records = encode_records(TEST_PID, ValueFormat::Plain, &event);
    let record = String::from_utf8(records[0].clone()).unwrap();
    let name_field = record.split('|').nth(2).unwrap();
    assert!(name_field.ends_with("-2a"));
}

#[test]
fn test_no_suffix_without_flag() {
    let mut event = TraceEvent::begin("async", "Load");
    event.id = 0x2A;
    let records = encode_records(TEST_PID, ValueFormat::Plain, &event);
    assert_eq!(records, vec![b"B|100|Load||async".to_vec()]);

    // Flags carrying other bits still leave the id off
    let event = event.with_flags(EventFlags::COPY);
    let records = encode_records(TEST_PID, ValueFormat::Plain, &event);
    assert_eq!(records, vec![b"B|100|Load||async".to_vec()]);
}

#[test]
fn test_large_id() {
    let event = TraceEvent::end("c", "n").with_id(u64::MAX);
    let records = encode_records(1, ValueFormat::Plain, &event);
    assert_eq!(records, vec![b"E|1|n-ffffffffffffffff||c".to_vec()]);
}

#[test]
fn test_unknown_phase_writes_nothing() {
    let (sink, recorded) = enabled_sink();
    let args = [TraceArg::new("x", 1i64)];
    for phase in ['X', 'S', 'F', 'M'] {
        sink.encode(&TraceEvent::new(Phase::from_char(phase), "c", "n").with_args(&args));
    }
    assert_eq!(recorded.write_count(), 0);
}

#[test]
fn test_json_format_sink() {
    let (sink, recorded) = memory_sink(AtraceConfig::default().with_value_format(ValueFormat::Json));
    sink.enable();
    let args = [
        TraceArg::new("quote", "it's \"ok\""),
        TraceArg::new("ptr", atrace_bridge::TraceValue::Pointer(0xdead)),
        TraceArg::new("ratio", 2.0f64),
    ];
    sink.encode(&TraceEvent::begin("c", "n").with_args(&args));
    assert_eq!(
        recorded.records(),
        vec!["B|100|n|quote=it's 'ok';ptr=0xdead;ratio=2.0|c"]
    );
}

#[test]
fn test_scoped_trace_pairs_records() {
    let (sink, recorded) = enabled_sink();
    {
        let _span = sink.scoped("gfx", "Composite");
        sink.instant("gfx", "Mark", &[]);
    }
    {
        let args = [TraceArg::new("n", 1u64)];
        let _span = atrace_bridge::ScopedTrace::with_id(&sink, "net", "Fetch", 0xab, &args);
    }
    assert_eq!(
        recorded.records(),
        vec![
            "B|100|Composite||gfx",
            "B|100|Mark||gfx",
            "E",
            "E|100|Composite||gfx",
            "B|100|Fetch-ab|n=1|net",
            "E|100|Fetch-ab||net",
        ]
    );
}
