// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Field handlers: static metadata plus a total parse operation per header.

use crate::exchange::Mode;
use crate::helpers::headers::split_list_items;
use crate::note::{AddNote, NoteKind};
use chrono::{DateTime, Utc};

pub mod notes;

pub mod content_encoding;
pub mod content_length;
pub mod content_md5;
pub mod date;
pub mod etag;
pub mod server;

/// How a list header's raw value is handed to `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPolicy {
    /// Once per physical occurrence of the field.
    Occurrence,
    /// Once per comma-separated item outside quoted-strings.
    Item,
}

/// Read-only description of one header field.
#[derive(Debug)]
pub struct FieldDefinition {
    /// Exact-case name used for display; matched case-insensitively.
    pub canonical_name: &'static str,
    pub description: &'static str,
    pub reference: &'static str,
    /// Grammar reference, informational only.
    pub syntax: &'static str,
    pub list_header: bool,
    /// Ignored unless `list_header` is set.
    pub list_policy: ListPolicy,
    pub deprecated: bool,
    pub valid_in_requests: bool,
    pub valid_in_responses: bool,
}

impl FieldDefinition {
    pub fn valid_in(&self, mode: Mode) -> bool {
        match mode {
            Mode::Request => self.valid_in_requests,
            Mode::Response => self.valid_in_responses,
        }
    }
}

/// Structured result of parsing one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Case-insensitive token, normalized to lowercase.
    Token(String),
    /// Opaque text kept as received.
    Text(String),
    EntityTag { weak: bool, tag: String },
    /// `None` when the value was not a valid integer.
    Integer(Option<u64>),
    /// `None` when the value was not a valid HTTP-date.
    Date(Option<DateTime<Utc>>),
}

/// Parsing and validation for one header field.
///
/// `parse` must be total: malformed input is reported through `add_note`
/// and a best-effort value is still returned.
pub trait FieldHandler: Send + Sync {
    fn definition(&self) -> &'static FieldDefinition;

    fn parse(&self, value: &str, add_note: &mut AddNote<'_>) -> FieldValue;

    /// Note kinds specific to this field, beyond the shared ones.
    fn notes(&self) -> &'static [&'static NoteKind] {
        &[]
    }

    /// Parse one physical occurrence, splitting it into items first when the
    /// field is a list header with [`ListPolicy::Item`].
    fn parse_occurrence(&self, value: &str, add_note: &mut AddNote<'_>) -> Vec<FieldValue> {
        let def = self.definition();
        if def.list_header && def.list_policy == ListPolicy::Item {
            let mut out = Vec::new();
            for item in split_list_items(value) {
                out.push(self.parse(item, &mut *add_note));
            }
            out
        } else {
            vec![self.parse(value, add_note)]
        }
    }
}

/// Every handler shipped with the crate, in registration order.
pub const FIELDS: &[&dyn FieldHandler] = &[
    &content_encoding::ContentEncoding,
    &content_length::ContentLength,
    &content_md5::ContentMd5,
    &date::Date,
    &etag::ETag,
    &server::Server,
];
