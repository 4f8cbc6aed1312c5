/*!
 * Value Sanitizer
 * Keeps rendered argument values from colliding with record delimiters
 *
 * The marker parser splits records on `|` and argument lists on `;`, and
 * treats `"` specially. A rendered value gets, in order:
 *
 * 1. every escaped quote (`\"`) replaced with `'`
 * 2. every remaining `"` removed
 * 3. every `;` replaced with `,`
 * 4. every `|` replaced with `!`
 *
 * Step 1 has to run before step 2, otherwise the quote inside `\"` would be
 * dropped and leave a stray backslash behind.
 */

/// Field separator within a record
pub const FIELD_SEPARATOR: char = '|';
/// Separator between `name=value` arguments
pub const ARG_SEPARATOR: char = ';';

const ESCAPED_QUOTE: &str = "\\\"";

/// Sanitize a single rendered value
pub fn sanitize_value(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(ESCAPED_QUOTE) {
        push_unquoted(&mut out, &rest[..pos]);
        out.push('\'');
        rest = &rest[pos + ESCAPED_QUOTE.len()..];
    }
    push_unquoted(&mut out, rest);

    out
}

/// Sanitize `out[start..]` in place, leaving everything before `start` untouched
///
/// `start` must lie on a char boundary; it is the length of the record buffer
/// just before the value was rendered into it.
pub fn sanitize_tail(out: &mut String, start: usize) {
    if start >= out.len() {
        return;
    }
    let tail = out.split_off(start);
    out.push_str(&sanitize_value(&tail));
}

/// Copy `chunk` (which holds no escaped quotes) applying steps 2-4
#[inline]
fn push_unquoted(out: &mut String, chunk: &str) {
    for c in chunk.chars() {
        match c {
            '"' => {}
            ARG_SEPARATOR => out.push(','),
            FIELD_SEPARATOR => out.push('!'),
            other => out.push(other),
        }
    }
}

/// True if `text` could be emitted as a value without confusing the parser
pub fn is_wire_safe(text: &str) -> bool {
    !text.contains(&[FIELD_SEPARATOR, ARG_SEPARATOR, '"'][..])
}
