// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::fields::{FieldDefinition, FieldHandler, FieldValue, ListPolicy};
use crate::note::AddNote;

/// `Server`: free-form product description, responses only.
pub struct Server;

static DEFINITION: FieldDefinition = FieldDefinition {
    canonical_name: "Server",
    description: "The `Server` header contains information about the software used by the \
origin server to handle the request.",
    reference: "https://www.rfc-editor.org/rfc/rfc9110.html#field.server",
    syntax: "Server = product *( RWS ( product / comment ) )",
    list_header: false,
    list_policy: ListPolicy::Occurrence,
    deprecated: false,
    valid_in_requests: false,
    valid_in_responses: true,
};

impl FieldHandler for Server {
    fn definition(&self) -> &'static FieldDefinition {
        &DEFINITION
    }

    fn parse(&self, value: &str, _add_note: &mut AddNote<'_>) -> FieldValue {
        FieldValue::Text(value.to_string())
    }
}
