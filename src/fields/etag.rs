// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::fields::notes::BAD_SYNTAX;
use crate::fields::{FieldDefinition, FieldHandler, FieldValue, ListPolicy};
use crate::helpers::headers::{unquote_string, validate_quoted_string};
use crate::note::AddNote;

/// `ETag`: a single entity-tag, strong or weak (`W/` prefix).
///
/// The opaque tag keeps its case; only the quoting is removed.
pub struct ETag;

static DEFINITION: FieldDefinition = FieldDefinition {
    canonical_name: "ETag",
    description: "The `ETag` header provides an opaque identifier for the representation.",
    reference: "https://www.rfc-editor.org/rfc/rfc9110.html#field.etag",
    syntax: "ETag = entity-tag",
    list_header: false,
    list_policy: ListPolicy::Occurrence,
    deprecated: false,
    valid_in_requests: true,
    valid_in_responses: true,
};

impl FieldHandler for ETag {
    fn definition(&self) -> &'static FieldDefinition {
        &DEFINITION
    }

    fn parse(&self, value: &str, add_note: &mut AddNote<'_>) -> FieldValue {
        let mut bad = false;
        let (weak, opaque) = if let Some(rest) = value.strip_prefix("W/") {
            (true, rest)
        } else if let Some(rest) = value.strip_prefix("w/") {
            // weak indicator is case-sensitive
            bad = true;
            (true, rest)
        } else {
            (false, value)
        };

        if validate_quoted_string(opaque).is_err() {
            bad = true;
        }
        if bad {
            add_note(&BAD_SYNTAX, &[]);
        }

        FieldValue::EntityTag {
            weak,
            tag: unquote_string(opaque),
        }
    }
}
