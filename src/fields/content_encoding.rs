// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::fields::notes::BAD_SYNTAX;
use crate::fields::{FieldDefinition, FieldHandler, FieldValue, ListPolicy};
use crate::helpers::token::find_invalid_token_char;
use crate::note::{AddNote, Category, Level, NoteKind};

/// `Content-Encoding`: content-codings applied to the body, one item per
/// coding. Anything other than `gzip` was not asked for.
pub struct ContentEncoding;

static DEFINITION: FieldDefinition = FieldDefinition {
    canonical_name: "Content-Encoding",
    description: "The `Content-Encoding` header's value indicates what additional content \
codings have been applied to the body, and thus what decoding mechanisms must be applied in \
order to obtain the media-type referenced by the Content-Type header field.

Content-Encoding is primarily used to allow a document to be compressed without losing the \
identity of its underlying media type; e.g., `gzip` and `deflate`.",
    reference: "https://www.rfc-editor.org/rfc/rfc9110.html#field.content-encoding",
    syntax: "Content-Encoding = #content-coding",
    list_header: true,
    list_policy: ListPolicy::Item,
    deprecated: false,
    valid_in_requests: true,
    valid_in_responses: true,
};

pub static ENCODING_UNWANTED: NoteKind = NoteKind {
    name: "ENCODING_UNWANTED",
    category: Category::Conneg,
    level: Level::Warn,
    summary: "{message} contained unwanted content-codings.",
    text: "{message}'s `Content-Encoding` header indicates it has content-codings applied \
(`{unwanted_codings}`) that weren't asked for.

Normally, clients ask for the encodings they want in the `Accept-Encoding` request header. \
Using encodings that the client doesn't explicitly request can lead to interoperability \
problems.",
};

static NOTES: &[&NoteKind] = &[&ENCODING_UNWANTED];

impl FieldHandler for ContentEncoding {
    fn definition(&self) -> &'static FieldDefinition {
        &DEFINITION
    }

    fn notes(&self) -> &'static [&'static NoteKind] {
        NOTES
    }

    fn parse(&self, value: &str, add_note: &mut AddNote<'_>) -> FieldValue {
        if find_invalid_token_char(value).is_some() {
            add_note(&BAD_SYNTAX, &[]);
        }
        let coding = value.to_ascii_lowercase();
        // gzip is the only coding we ask for
        if coding != "gzip" {
            add_note(&ENCODING_UNWANTED, &[("unwanted_codings", value)]);
        }
        FieldValue::Token(coding)
    }
}
