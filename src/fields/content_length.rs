// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::fields::notes::BAD_SYNTAX;
use crate::fields::{FieldDefinition, FieldHandler, FieldValue, ListPolicy};
use crate::note::AddNote;

/// `Content-Length`: decimal number of octets in the body.
///
/// Whether the body actually matched is only known once input ends, so
/// that comparison lives in the driver.
pub struct ContentLength;

static DEFINITION: FieldDefinition = FieldDefinition {
    canonical_name: "Content-Length",
    description: "The `Content-Length` header indicates the size of the body, in number of \
bytes. In responses to the HEAD method, it indicates the size of the body that would have \
been sent had the request been a GET.

If Content-Length is incorrect, persistent connections will not work, and caches may not \
store the response (since they can't be sure if they have the whole response).",
    reference: "https://www.rfc-editor.org/rfc/rfc9110.html#field.content-length",
    syntax: "Content-Length = 1*DIGIT",
    list_header: false,
    list_policy: ListPolicy::Occurrence,
    deprecated: false,
    valid_in_requests: true,
    valid_in_responses: true,
};

impl FieldHandler for ContentLength {
    fn definition(&self) -> &'static FieldDefinition {
        &DEFINITION
    }

    fn parse(&self, value: &str, add_note: &mut AddNote<'_>) -> FieldValue {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            add_note(&BAD_SYNTAX, &[]);
            return FieldValue::Integer(None);
        }
        match value.parse::<u64>() {
            Ok(n) => FieldValue::Integer(Some(n)),
            Err(_) => {
                add_note(&BAD_SYNTAX, &[]);
                FieldValue::Integer(None)
            }
        }
    }
}
