// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::fields::notes::BAD_SYNTAX;
use crate::fields::{FieldDefinition, FieldHandler, FieldValue, ListPolicy};
use crate::note::AddNote;
use base64::Engine;

/// `Content-MD5`: base64 MD5 digest of the body. Deprecated.
pub struct ContentMd5;

static DEFINITION: FieldDefinition = FieldDefinition {
    canonical_name: "Content-MD5",
    description: "The `Content-MD5` header is an MD5 digest of the body, and provides an \
end-to-end message integrity check (MIC).

It was removed from HTTP because of inconsistent implementation with respect to partial \
responses.",
    reference: "https://www.rfc-editor.org/rfc/rfc7231.html#appendix-B",
    syntax: "Content-MD5 = <base64 of 128 bit MD5 digest>",
    list_header: false,
    list_policy: ListPolicy::Occurrence,
    deprecated: true,
    valid_in_requests: true,
    valid_in_responses: true,
};

/// Size of an MD5 digest in bytes.
const DIGEST_LEN: usize = 16;

impl FieldHandler for ContentMd5 {
    fn definition(&self) -> &'static FieldDefinition {
        &DEFINITION
    }

    fn parse(&self, value: &str, add_note: &mut AddNote<'_>) -> FieldValue {
        let decoded = base64::engine::general_purpose::STANDARD.decode(value);
        if !matches!(decoded, Ok(ref digest) if digest.len() == DIGEST_LEN) {
            add_note(&BAD_SYNTAX, &[]);
        }
        FieldValue::Text(value.to_string())
    }
}
