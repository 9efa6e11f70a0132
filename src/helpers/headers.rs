// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

/// Split a raw field line into its name and value.
///
/// The value is trimmed of surrounding whitespace. Returns an error message
/// when there is no colon, the name is empty, or whitespace precedes the colon.
pub fn split_field_line(line: &str) -> Result<(&str, &str), String> {
    let Some(colon) = line.find(':') else {
        return Err(format!("Field line has no colon: '{}'", line));
    };
    let name = &line[..colon];
    if name.is_empty() {
        return Err(format!("Field line has an empty name: '{}'", line));
    }
    if name.ends_with([' ', '\t']) {
        return Err(format!("Whitespace before colon in field line: '{}'", line));
    }
    Ok((name, line[colon + 1..].trim()))
}

/// Split a list-based field value on commas that are not inside a quoted-string.
///
/// Each item is trimmed and empty items are skipped, so `"a, , b"` yields
/// `["a", "b"]`.
pub fn split_list_items(val: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut in_quote = false;
    let mut prev_backslash = false;

    for (i, b) in val.bytes().enumerate() {
        if prev_backslash {
            prev_backslash = false;
            continue;
        }
        match b {
            b'\\' if in_quote => prev_backslash = true,
            b'"' => in_quote = !in_quote,
            b',' if !in_quote => {
                let part = val[start..i].trim();
                if !part.is_empty() {
                    parts.push(part);
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    let last = val[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

/// Validate a quoted-string per HTTP rules: must start and end with DQUOTE, support backslash escapes,
/// must not contain unescaped control characters (except HTAB). Returns Ok(()) on success, Err(msg)
/// on failure.
pub fn validate_quoted_string(val: &str) -> Result<(), String> {
    let bytes = val.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'"' || bytes[bytes.len() - 1] != b'"' {
        return Err(format!("Quoted-string not properly quoted: '{}'", val));
    }

    let mut i = 1usize;
    let mut prev_backslash = false;
    while i + 1 < bytes.len() {
        let b = bytes[i];
        if prev_backslash {
            prev_backslash = false;
        } else if b == b'\\' {
            prev_backslash = true;
        } else if b == b'"' {
            return Err(format!("Unescaped quote in quoted-string: '{}'", val));
        } else if (b < 0x20 && b != b'\t') || b == 0x7f {
            return Err(format!("Control character in quoted-string: '{}'", val));
        }
        i += 1;
    }

    if prev_backslash {
        return Err(format!(
            "Quoted-string ends with escape character: '{}'",
            val
        ));
    }

    Ok(())
}

/// Remove the surrounding quotes of a quoted-string and resolve its
/// backslash escapes.
///
/// Values that are not a well-formed quoted-string are returned unchanged.
pub fn unquote_string(val: &str) -> String {
    if validate_quoted_string(val).is_err() {
        return val.to_string();
    }
    let inner = &val[1..val.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
