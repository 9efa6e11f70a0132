// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Host-side handling of a complete captured message.
//!
//! [`frame`] is a minimal framer for the command line: it splits the head
//! into field lines and picks a body delimiter, without decoding chunked
//! bodies. [`analyze`] feeds the result through a [`Driver`].

use crate::driver::{Delimiter, Driver, Policy, State};
use crate::exchange::{Exchange, Mode};
use crate::registry::Registry;
use chrono::{DateTime, Utc};
use tracing::debug;

/// A message split into field lines and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framed<'a> {
    pub start_line: Option<&'a [u8]>,
    /// Field lines without terminators, continuation lines already joined.
    pub field_lines: Vec<Vec<u8>>,
    pub delimiter: Delimiter,
    pub body: &'a [u8],
    /// The status code rules out a body (1xx, 204, 304).
    pub bodiless: bool,
}

/// Split `input` at the first empty line.
pub fn frame(input: &[u8], mode: Mode) -> Framed<'_> {
    let (head, body) = split_head(input);

    let mut lines = head
        .split(|&b| b == b'\n')
        .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
        .peekable();

    let start_line = match lines.peek() {
        Some(first) if is_start_line(first) => lines.next(),
        _ => None,
    };

    let mut field_lines: Vec<Vec<u8>> = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        match (line[0], field_lines.last_mut()) {
            (b' ' | b'\t', Some(prev)) => {
                prev.push(b' ');
                prev.extend_from_slice(line.trim_ascii_start());
            }
            _ => field_lines.push(line.to_vec()),
        }
    }

    let bodiless = mode == Mode::Response
        && start_line
            .and_then(status_code)
            .is_some_and(|code| (100..200).contains(&code) || code == 204 || code == 304);
    let (delimiter, body) = if bodiless {
        (Delimiter::Length, &body[..0])
    } else {
        (pick_delimiter(&field_lines, mode), body)
    };
    debug!(
        fields = field_lines.len(),
        body = body.len(),
        ?delimiter,
        bodiless,
        "framed input"
    );
    Framed {
        start_line,
        field_lines,
        delimiter,
        body,
        bodiless,
    }
}

/// Run a whole captured message through a fresh driver and return its
/// exchange. End of input is signalled whenever the body is still open,
/// except for bodiless responses whose Content-Length describes the
/// representation rather than this message.
pub fn analyze(
    registry: &Registry,
    input: &[u8],
    mode: Mode,
    now: Option<DateTime<Utc>>,
    policy: Policy,
) -> crate::Result<Exchange> {
    let framed = frame(input, mode);
    let mut driver = Driver::new(registry, mode).with_policy(policy);
    if let Some(now) = now {
        driver = driver.with_now(now);
    }

    for line in &framed.field_lines {
        driver.header_line(line)?;
    }
    driver.headers_end(framed.delimiter)?;
    if !framed.body.is_empty() && driver.state() == State::InBody {
        driver.body(framed.body)?;
    }
    if driver.state() == State::InBody && !framed.bodiless {
        driver.input_end()?;
    }
    Ok(driver.into_exchange())
}

fn split_head(input: &[u8]) -> (&[u8], &[u8]) {
    let crlf = find(input, b"\r\n\r\n").map(|i| (i, 4));
    let lf = find(input, b"\n\n").map(|i| (i, 2));
    let end = match (crlf, lf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    };
    match end {
        Some((i, len)) => (&input[..i], &input[i + len..]),
        None => (input, &[]),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn is_start_line(line: &[u8]) -> bool {
    line.starts_with(b"HTTP/") || find(line, b" HTTP/").is_some()
}

fn status_code(start_line: &[u8]) -> Option<u16> {
    let line = std::str::from_utf8(start_line).ok()?;
    let mut parts = line.split_ascii_whitespace();
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}

fn pick_delimiter(field_lines: &[Vec<u8>], mode: Mode) -> Delimiter {
    let mut has_length = false;
    for line in field_lines {
        let text = String::from_utf8_lossy(line);
        let Some((name, value)) = text.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.eq_ignore_ascii_case("transfer-encoding")
            && value.to_ascii_lowercase().contains("chunked")
        {
            return Delimiter::Chunked;
        }
        if name.eq_ignore_ascii_case("content-length") {
            has_length = true;
        }
    }
    match (has_length, mode) {
        (true, _) | (false, Mode::Request) => Delimiter::Length,
        (false, Mode::Response) => Delimiter::Close,
    }
}
