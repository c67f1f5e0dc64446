//! Repair of non-standard JSON emitted by the prediction service.

use std::borrow::Cow;

/// Replace bare `NaN` tokens with `null` so the text parses as JSON.
///
/// Only whole tokens outside string literals are replaced; `"NaN"` inside a
/// string and identifiers such as `NaNoseconds` are left alone.
pub fn normalize_nan(text: &str) -> Cow<'_, str> {
    if !text.contains("NaN") {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
        } else if b == b'"' {
            in_string = true;
        } else if bytes[i..].starts_with(b"NaN")
            && is_boundary(bytes, i.wrapping_sub(1))
            && is_boundary(bytes, i + 3)
        {
            out.push_str(&text[copied..i]);
            out.push_str("null");
            i += 3;
            copied = i;
            continue;
        }
        i += 1;
    }

    if copied == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[copied..]);
    Cow::Owned(out)
}

fn is_boundary(bytes: &[u8], i: usize) -> bool {
    bytes
        .get(i)
        .is_none_or(|b| !b.is_ascii_alphanumeric() && *b != b'_')
}
