//! Key lookup over raw single-line records.
//!
//! Records are never parsed. A key is located by scanning for its quoted
//! literal (`"ns"`), the value starts after the following colon and runs to
//! the next comma. This mirrors how the reader decides completeness: cheap
//! substring checks over text that is assumed, not validated, to be JSON.

use memchr::{memchr, memmem};

/// Byte index just past the colon that follows the first `"key"` in `record`.
///
/// Occurrences of the quoted literal that are not followed by a colon (the
/// literal used as a value) are skipped.
pub(crate) fn value_start(record: &str, key: &str) -> Option<usize> {
    let bytes = record.as_bytes();
    let key_bytes = key.as_bytes();
    for pos in memmem::find_iter(bytes, key_bytes) {
        let end = pos + key_bytes.len();
        if pos == 0 || bytes[pos - 1] != b'"' || bytes.get(end) != Some(&b'"') {
            continue;
        }
        let after_quote = end + 1;
        let gap = bytes[after_quote..]
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        if bytes.get(after_quote + gap) == Some(&b':') {
            return Some(after_quote + gap + 1);
        }
    }
    None
}

/// Value of the first `"key"` in `record`, with surrounding whitespace and
/// quotes removed.
///
/// The value ends at the next `,`; when no comma follows, it ends at the next
/// `}` or at the end of the record.
#[must_use]
pub fn quoted_value<'a>(record: &'a str, key: &str) -> Option<&'a str> {
    let start = value_start(record, key)?;
    let rest = &record[start..];
    let end = memchr(b',', rest.as_bytes())
        .or_else(|| memchr(b'}', rest.as_bytes()))
        .unwrap_or(rest.len());
    Some(rest[..end].trim().trim_matches('"').trim())
}

/// The object value of `"key"`, from its `{` to the matching `}`.
///
/// Braces inside string values do not count. An object still open at the end
/// of the record runs to the end; a value that is not an object is `None`.
#[must_use]
pub fn object_value<'a>(record: &'a str, key: &str) -> Option<&'a str> {
    let start = value_start(record, key)?;
    let rest = record[start..].trim_start();
    if !rest.starts_with('{') {
        return None;
    }
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (pos, byte) in rest.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..=pos]);
                }
            }
            _ => {}
        }
    }
    Some(rest)
}
