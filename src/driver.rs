// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Streaming driver: takes framed header lines for one message, dispatches
//! them to field handlers and finalizes body-dependent checks.
//!
//! ```text
//! AwaitingStart -> InHeaders -> InBody -> Closed
//! ```
//!
//! The framer calls [`Driver::header_line`] for each field line,
//! [`Driver::headers_end`] on the blank line, [`Driver::body`] for body bytes
//! and [`Driver::input_end`] when the input is exhausted. With a LENGTH
//! delimiter the driver closes itself once the declared length arrived.

use crate::error::{Error, Result};
use crate::exchange::{Exchange, Mode};
use crate::fields::notes::{
    BAD_DATE_SYNTAX, BAD_FIELD_LINE, BAD_SYNTAX, DUPLICATE_FIELD, FIELD_DEPRECATED,
    FIELD_WRONG_CONTEXT,
};
use crate::fields::{FieldHandler, FieldValue};
use crate::helpers::headers::split_field_line;
use crate::helpers::token::find_invalid_token_char;
use crate::http_date::{skew_seconds, MAX_CLOCK_SKEW_SECS};
use crate::note::{Category, Level, NoteKind};
use crate::registry::Registry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

/// Driver lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingStart,
    InHeaders,
    InBody,
    Closed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            State::AwaitingStart => "awaiting start",
            State::InHeaders => "in headers",
            State::InBody => "in body",
            State::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// How the end of the body is determined, as decided by the framer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Length,
    Chunked,
    Close,
}

/// What to do when a single-value field occurs more than once.
/// A DUPLICATE_FIELD note is emitted either way.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the first value; the repeat is not parsed.
    #[default]
    KeepFirst,
    /// Parse the repeat and replace the stored value.
    Override,
}

/// Whether deprecated fields are called out.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeprecatedPolicy {
    #[default]
    Note,
    Ignore,
}

/// Emission decisions made by the driver before notes reach the exchange.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    pub duplicate: DuplicatePolicy,
    pub deprecated: DeprecatedPolicy,
    /// Note kind names that are never emitted.
    pub suppress: HashSet<String>,
}

pub static CONTENT_LENGTH_INCORRECT: NoteKind = NoteKind {
    name: "CONTENT_LENGTH_INCORRECT",
    category: Category::Connection,
    level: Level::Bad,
    summary: "{message}'s Content-Length header is incorrect.",
    text: "`Content-Length` is used by HTTP to delimit messages; that is, to mark the end of \
one message and the beginning of the next. {message} declared {content_length} bytes, but \
{body_length} bytes were received.

An incorrect `Content-Length` can cause security and interoperability problems; for example, \
a cache could store a truncated body, or a following message could be misread.",
};

pub static BODY_CLOSE_DELIMITED: NoteKind = NoteKind {
    name: "BODY_CLOSE_DELIMITED",
    category: Category::Connection,
    level: Level::Info,
    summary: "{message} body ({body_length} bytes) was delimited by closing the connection.",
    text: "Without `Content-Length` or chunked transfer-coding, the only way to find the end \
of the body is the connection closing. That prevents the connection from being reused and \
makes it impossible to tell a complete body from a truncated one.",
};

pub static DATE_INCORRECT: NoteKind = NoteKind {
    name: "DATE_INCORRECT",
    category: Category::General,
    level: Level::Bad,
    summary: "The Date header is {skew} seconds off.",
    text: "Clocks that are out of sync cause caching problems, since freshness is calculated \
from the `Date` header. The sender's clock should be synchronised, for example with NTP.",
};

pub static DATE_CORRECT: NoteKind = NoteKind {
    name: "DATE_CORRECT",
    category: Category::General,
    level: Level::Good,
    summary: "The Date header is correct.",
    text: "The sender's clock matches the time the message was assumed to be received.",
};

/// Note kinds emitted by the driver itself or shared by several fields.
pub static DRIVER_NOTES: &[&NoteKind] = &[
    &BAD_SYNTAX,
    &BAD_FIELD_LINE,
    &BAD_DATE_SYNTAX,
    &DUPLICATE_FIELD,
    &FIELD_WRONG_CONTEXT,
    &FIELD_DEPRECATED,
    &CONTENT_LENGTH_INCORRECT,
    &BODY_CLOSE_DELIMITED,
    &DATE_INCORRECT,
    &DATE_CORRECT,
];

/// Analyzes exactly one message.
pub struct Driver<'r> {
    registry: &'r Registry,
    policy: Policy,
    state: State,
    delimiter: Option<Delimiter>,
    body_length: u64,
    exchange: Exchange,
}

impl<'r> Driver<'r> {
    pub fn new(registry: &'r Registry, mode: Mode) -> Self {
        Self {
            registry,
            policy: Policy::default(),
            state: State::AwaitingStart,
            delimiter: None,
            body_length: 0,
            exchange: Exchange::new(mode, None),
        }
    }

    /// Assume the message was received at `now`.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.exchange.set_now(now);
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn delimiter(&self) -> Option<Delimiter> {
        self.delimiter
    }

    pub fn body_length(&self) -> u64 {
        self.body_length
    }

    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    pub fn into_exchange(self) -> Exchange {
        self.exchange
    }

    /// Analyze one raw field line (`Name: value`, no line terminator).
    pub fn header_line(&mut self, line: &[u8]) -> Result<()> {
        match self.state {
            State::AwaitingStart => {
                trace!("first field line, entering headers");
                self.state = State::InHeaders;
            }
            State::InHeaders => {}
            state => {
                return Err(Error::InvalidState {
                    operation: "header_line",
                    state,
                })
            }
        }

        let (text, valid_utf8) = match std::str::from_utf8(line) {
            Ok(s) => (Cow::Borrowed(s), true),
            Err(_) => (String::from_utf8_lossy(line), false),
        };

        let (name, value) = match split_field_line(&text) {
            Ok(parts) => parts,
            Err(msg) => {
                debug!(%msg, "malformed field line");
                self.emit(&BAD_FIELD_LINE, &[("line", text.trim())]);
                return Ok(());
            }
        };
        if find_invalid_token_char(name).is_some() {
            debug!(field = name, "invalid field name");
            self.emit(&BAD_FIELD_LINE, &[("line", text.trim())]);
            return Ok(());
        }
        if !valid_utf8 {
            let shown = self
                .registry
                .get(name)
                .map(|h| h.definition().canonical_name)
                .unwrap_or(name);
            debug!(field = shown, "field value is not UTF-8");
            self.emit(&BAD_SYNTAX, &[("field_name", shown)]);
        }

        self.dispatch(name, value);
        Ok(())
    }

    /// The blank line after the fields was seen; `delimiter` says how the
    /// body ends.
    pub fn headers_end(&mut self, delimiter: Delimiter) -> Result<()> {
        match self.state {
            State::AwaitingStart | State::InHeaders => {}
            state => {
                return Err(Error::InvalidState {
                    operation: "headers_end",
                    state,
                })
            }
        }
        trace!(?delimiter, "headers complete, entering body");
        self.state = State::InBody;
        self.delimiter = Some(delimiter);
        self.check_date();
        if delimiter == Delimiter::Length && self.length_reached() {
            self.finalize();
        }
        Ok(())
    }

    /// Account for body bytes. Chunked bodies are passed as received.
    pub fn body(&mut self, chunk: &[u8]) -> Result<()> {
        if self.state != State::InBody {
            return Err(Error::InvalidState {
                operation: "body",
                state: self.state,
            });
        }
        self.body_length += chunk.len() as u64;
        if self.delimiter == Some(Delimiter::Length) && self.length_reached() {
            self.finalize();
        }
        Ok(())
    }

    /// The input is exhausted. Runs the deferred checks once; later calls
    /// do nothing.
    pub fn input_end(&mut self) -> Result<()> {
        match self.state {
            State::InBody => {
                self.finalize();
                Ok(())
            }
            State::Closed => {
                trace!("input already ended");
                Ok(())
            }
            state => Err(Error::InvalidState {
                operation: "input_end",
                state,
            }),
        }
    }

    fn dispatch(&mut self, name: &str, value: &str) {
        let Some(handler) = self.registry.get(name) else {
            debug!(field = name, "no handler, keeping value unanalyzed");
            self.exchange
                .push_unanalyzed(name.to_string(), value.to_string());
            return;
        };
        let def = handler.definition();
        let field_name = def.canonical_name;

        if !def.valid_in(self.exchange.mode()) {
            debug!(field = field_name, mode = %self.exchange.mode(), "field not valid in mode");
            self.emit(&FIELD_WRONG_CONTEXT, &[("field_name", field_name)]);
            return;
        }

        let seen = self.exchange.has_field(field_name);
        if def.deprecated && !seen && self.policy.deprecated == DeprecatedPolicy::Note {
            self.emit(
                &FIELD_DEPRECATED,
                &[("field_name", field_name), ("reference", def.reference)],
            );
        }

        if !def.list_header && seen {
            match self.policy.duplicate {
                DuplicatePolicy::KeepFirst => {
                    self.emit(
                        &DUPLICATE_FIELD,
                        &[("field_name", field_name), ("kept", "first")],
                    );
                }
                DuplicatePolicy::Override => {
                    self.emit(
                        &DUPLICATE_FIELD,
                        &[("field_name", field_name), ("kept", "last")],
                    );
                    if let Some(v) = self.parse_with(handler, value).into_iter().next() {
                        self.exchange.replace_value(field_name, v);
                    }
                }
            }
            return;
        }

        for v in self.parse_with(handler, value) {
            self.exchange.push_value(field_name, v);
        }
    }

    fn parse_with(&mut self, handler: &'static dyn FieldHandler, value: &str) -> Vec<FieldValue> {
        let field_name = handler.definition().canonical_name;
        debug!(field = field_name, "dispatching field");
        let suppress = &self.policy.suppress;
        let exchange = &mut self.exchange;
        let mut add_note = |kind: &'static NoteKind, params: &[(&str, &str)]| {
            if suppress.contains(kind.name) {
                return;
            }
            let mut merged = Vec::with_capacity(params.len() + 1);
            merged.push(("field_name", field_name));
            merged.extend_from_slice(params);
            exchange.add_note(kind, &merged);
        };
        handler.parse_occurrence(value, &mut add_note)
    }

    fn emit(&mut self, kind: &'static NoteKind, params: &[(&str, &str)]) {
        if self.policy.suppress.contains(kind.name) {
            trace!(note = kind.name, "note suppressed");
            return;
        }
        self.exchange.add_note(kind, params);
    }

    fn declared_length(&self) -> Option<u64> {
        match self.exchange.first("Content-Length") {
            Some(FieldValue::Integer(n)) => *n,
            _ => None,
        }
    }

    fn length_reached(&self) -> bool {
        self.body_length >= self.declared_length().unwrap_or(0)
    }

    fn check_date(&mut self) {
        let Some(now) = self.exchange.now() else {
            return;
        };
        let Some(FieldValue::Date(Some(date))) = self.exchange.first("Date") else {
            return;
        };
        let skew = skew_seconds(*date, now);
        if skew.abs() > MAX_CLOCK_SKEW_SECS {
            let skew = skew.to_string();
            self.emit(&DATE_INCORRECT, &[("skew", skew.as_str())]);
        } else {
            self.emit(&DATE_CORRECT, &[]);
        }
    }

    fn finalize(&mut self) {
        if self.state == State::Closed {
            return;
        }
        self.state = State::Closed;
        debug!(body_length = self.body_length, delimiter = ?self.delimiter, "finalizing");

        let body_length = self.body_length.to_string();
        if self.delimiter != Some(Delimiter::Chunked) {
            if let Some(declared) = self.declared_length() {
                if declared != self.body_length {
                    let declared = declared.to_string();
                    self.emit(
                        &CONTENT_LENGTH_INCORRECT,
                        &[
                            ("content_length", declared.as_str()),
                            ("body_length", body_length.as_str()),
                        ],
                    );
                }
            }
        }
        if self.delimiter == Some(Delimiter::Close) {
            self.emit(&BODY_CLOSE_DELIMITED, &[("body_length", body_length.as_str())]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::content_encoding::ENCODING_UNWANTED;
    use crate::test_helpers::{feed_headers, make_test_registry, note_names};
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn lifecycle_transitions() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        assert_eq!(d.state(), State::AwaitingStart);
        d.header_line(b"Server: x")?;
        assert_eq!(d.state(), State::InHeaders);
        d.headers_end(Delimiter::Close)?;
        assert_eq!(d.state(), State::InBody);
        d.body(b"abc")?;
        d.input_end()?;
        assert_eq!(d.state(), State::Closed);
        assert_eq!(d.body_length(), 3);
        Ok(())
    }

    #[test]
    fn list_values_accumulate_in_order() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        feed_headers(&mut d, &["Content-Encoding: gzip", "content-encoding: foo"])?;
        let ex = d.exchange();
        assert_eq!(
            ex.field("Content-Encoding"),
            Some(
                &[
                    FieldValue::Token("gzip".into()),
                    FieldValue::Token("foo".into())
                ][..]
            )
        );
        let unwanted: Vec<_> = ex
            .notes()
            .iter()
            .filter(|n| n.kind() == &ENCODING_UNWANTED)
            .collect();
        assert_eq!(unwanted.len(), 1);
        assert_eq!(unwanted[0].param("unwanted_codings"), Some("foo"));
        assert_eq!(unwanted[0].param("field_name"), Some("Content-Encoding"));
        Ok(())
    }

    #[test]
    fn unknown_fields_are_kept_without_notes() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        feed_headers(&mut d, &["X-Custom: whatever"])?;
        assert!(d.exchange().notes().is_empty());
        assert_eq!(
            d.exchange().unanalyzed(),
            &[("X-Custom".to_string(), "whatever".to_string())]
        );
        Ok(())
    }

    #[test]
    fn wrong_mode_is_flagged_and_not_parsed() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Request);
        feed_headers(&mut d, &["Server: Apache"])?;
        assert_eq!(note_names(d.exchange()), vec!["FIELD_WRONG_CONTEXT"]);
        assert!(d.exchange().field("Server").is_none());
        Ok(())
    }

    #[rstest]
    #[case(DuplicatePolicy::KeepFirst, "a", "first")]
    #[case(DuplicatePolicy::Override, "b", "last")]
    fn duplicates_follow_policy(
        #[case] duplicate: DuplicatePolicy,
        #[case] expected_tag: &str,
        #[case] kept: &str,
    ) -> anyhow::Result<()> {
        let reg = make_test_registry();
        let policy = Policy {
            duplicate,
            ..Policy::default()
        };
        let mut d = Driver::new(&reg, Mode::Response).with_policy(policy);
        feed_headers(&mut d, &["ETag: \"a\"", "ETag: \"b\""])?;
        let ex = d.exchange();
        assert_eq!(
            ex.field("ETag"),
            Some(
                &[FieldValue::EntityTag {
                    weak: false,
                    tag: expected_tag.into()
                }][..]
            )
        );
        let dup: Vec<_> = ex
            .notes()
            .iter()
            .filter(|n| n.kind() == &DUPLICATE_FIELD)
            .collect();
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].param("kept"), Some(kept));
        Ok(())
    }

    #[rstest]
    #[case(DeprecatedPolicy::Note, true)]
    #[case(DeprecatedPolicy::Ignore, false)]
    fn deprecated_follows_policy(
        #[case] deprecated: DeprecatedPolicy,
        #[case] expect_note: bool,
    ) -> anyhow::Result<()> {
        let reg = make_test_registry();
        let policy = Policy {
            deprecated,
            ..Policy::default()
        };
        let mut d = Driver::new(&reg, Mode::Response).with_policy(policy);
        feed_headers(&mut d, &["Content-MD5: Q2hlY2sgSW50ZWdyaXR5IQ=="])?;
        assert_eq!(
            note_names(d.exchange()).contains(&"FIELD_DEPRECATED"),
            expect_note
        );
        Ok(())
    }

    #[test]
    fn suppressed_notes_are_never_emitted() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let policy = Policy {
            suppress: ["ENCODING_UNWANTED".to_string()].into_iter().collect(),
            ..Policy::default()
        };
        let mut d = Driver::new(&reg, Mode::Response).with_policy(policy);
        feed_headers(&mut d, &["Content-Encoding: br"])?;
        assert!(d.exchange().notes().is_empty());
        Ok(())
    }

    #[rstest]
    #[case(b"no colon".as_slice())]
    #[case(b"Bad Name: x".as_slice())]
    #[case(b"ETag : \"x\"".as_slice())]
    fn malformed_lines_are_reported_per_line(#[case] line: &[u8]) -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        d.header_line(line)?;
        let ex = d.exchange();
        assert_eq!(note_names(ex), vec!["BAD_FIELD_LINE"]);
        assert_eq!(ex.notes()[0].param("line"), std::str::from_utf8(line).ok());
        assert!(ex.notes()[0].param("field_name").is_none());
        assert!(ex.field("ETag").is_none());
        Ok(())
    }

    #[test]
    fn malformed_line_summary_does_not_name_a_header() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        d.header_line(b"no colon here")?;
        let rendered = d.exchange().notes()[0].render()?;
        assert_eq!(
            rendered.summary,
            "This response has a header line that can't be parsed."
        );
        assert!(rendered.text.contains("`no colon here`"));
        Ok(())
    }

    #[test]
    fn with_now_keeps_collected_state() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        feed_headers(&mut d, &["ETag: abc", "Date: Wed, 21 Oct 2015 07:28:00 GMT"])?;
        let now = Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 5).unwrap();
        let mut d = d.with_now(now);
        assert_eq!(d.exchange().now(), Some(now));
        assert_eq!(note_names(d.exchange()), vec!["BAD_SYNTAX"]);
        assert!(d.exchange().first("ETag").is_some());
        d.headers_end(Delimiter::Length)?;
        assert_eq!(note_names(d.exchange()), vec!["BAD_SYNTAX", "DATE_CORRECT"]);
        Ok(())
    }

    #[test]
    fn invalid_utf8_is_bad_syntax_not_failure() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        d.header_line(b"Server: caf\xe9")?;
        let ex = d.exchange();
        assert_eq!(note_names(ex), vec!["BAD_SYNTAX"]);
        assert_eq!(ex.notes()[0].param("field_name"), Some("Server"));
        assert_eq!(
            ex.first("Server"),
            Some(&FieldValue::Text("caf\u{fffd}".into()))
        );
        Ok(())
    }

    #[test]
    fn close_delimited_notes_wait_for_input_end() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        feed_headers(&mut d, &["Server: x"])?;
        d.headers_end(Delimiter::Close)?;
        d.body(b"hello")?;
        assert!(!note_names(d.exchange()).contains(&"BODY_CLOSE_DELIMITED"));

        d.input_end()?;
        let once = note_names(d.exchange());
        assert_eq!(once, vec!["BODY_CLOSE_DELIMITED"]);
        assert_eq!(d.exchange().notes()[0].param("body_length"), Some("5"));

        d.input_end()?;
        assert_eq!(note_names(d.exchange()), once);
        Ok(())
    }

    #[test]
    fn length_delimited_finalizes_when_complete() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        feed_headers(&mut d, &["Content-Length: 4"])?;
        d.headers_end(Delimiter::Length)?;
        d.body(b"ab")?;
        assert_eq!(d.state(), State::InBody);
        d.body(b"cd")?;
        assert_eq!(d.state(), State::Closed);
        d.input_end()?;
        assert!(d.exchange().notes().is_empty());
        Ok(())
    }

    #[test]
    fn zero_length_closes_at_headers_end() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Request);
        d.headers_end(Delimiter::Length)?;
        assert_eq!(d.state(), State::Closed);
        Ok(())
    }

    #[test]
    fn short_body_is_content_length_incorrect() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        feed_headers(&mut d, &["Content-Length: 10"])?;
        d.headers_end(Delimiter::Length)?;
        d.body(b"abc")?;
        d.input_end()?;
        d.input_end()?;
        let ex = d.exchange();
        assert_eq!(note_names(ex), vec!["CONTENT_LENGTH_INCORRECT"]);
        let r = ex.notes()[0].render()?;
        assert!(r.text.contains("declared 10 bytes, but 3 bytes"));
        Ok(())
    }

    #[test]
    fn chunked_ignores_content_length() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        feed_headers(&mut d, &["Content-Length: 10"])?;
        d.headers_end(Delimiter::Chunked)?;
        d.body(b"3\r\nabc\r\n0\r\n\r\n")?;
        assert_eq!(d.state(), State::InBody);
        d.input_end()?;
        assert_eq!(d.state(), State::Closed);
        assert!(d.exchange().notes().is_empty());
        Ok(())
    }

    #[rstest]
    #[case(10, "DATE_CORRECT")]
    #[case(-10, "DATE_CORRECT")]
    #[case(120, "DATE_INCORRECT")]
    fn date_compared_with_reference_clock(
        #[case] offset: i64,
        #[case] expected: &str,
    ) -> anyhow::Result<()> {
        let reg = make_test_registry();
        let date = Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap();
        let now = date + chrono::Duration::seconds(offset);
        let mut d = Driver::new(&reg, Mode::Response).with_now(now);
        feed_headers(&mut d, &["Date: Wed, 21 Oct 2015 07:28:00 GMT"])?;
        d.headers_end(Delimiter::Length)?;
        assert_eq!(note_names(d.exchange()), vec![expected]);
        Ok(())
    }

    #[test]
    fn misuse_is_a_contract_error() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        assert!(matches!(
            d.body(b"x"),
            Err(Error::InvalidState {
                operation: "body",
                state: State::AwaitingStart
            })
        ));
        assert!(matches!(
            d.input_end(),
            Err(Error::InvalidState { operation: "input_end", .. })
        ));
        d.headers_end(Delimiter::Close)?;
        assert!(matches!(
            d.header_line(b"Server: x"),
            Err(Error::InvalidState {
                operation: "header_line",
                state: State::InBody
            })
        ));
        assert!(matches!(
            d.headers_end(Delimiter::Close),
            Err(Error::InvalidState { .. })
        ));
        d.input_end()?;
        assert!(matches!(
            d.body(b"x"),
            Err(Error::InvalidState {
                state: State::Closed,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn every_driver_note_renders_with_its_params() -> anyhow::Result<()> {
        let reg = make_test_registry();
        let mut d = Driver::new(&reg, Mode::Response);
        feed_headers(
            &mut d,
            &[
                "ETag: nope",
                "ETag: \"x\"",
                "Content-MD5: short",
                "Content-Length: 9",
                "Date: yesterday",
            ],
        )?;
        d.headers_end(Delimiter::Close)?;
        d.input_end()?;
        for note in d.exchange().notes() {
            note.render()?;
        }
        assert_eq!(
            note_names(d.exchange()),
            vec![
                "BAD_SYNTAX",
                "DUPLICATE_FIELD",
                "FIELD_DEPRECATED",
                "BAD_SYNTAX",
                "BAD_DATE_SYNTAX",
                "CONTENT_LENGTH_INCORRECT",
                "BODY_CLOSE_DELIMITED",
            ]
        );
        Ok(())
    }
}
