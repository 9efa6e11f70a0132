// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::fields::notes::BAD_DATE_SYNTAX;
use crate::fields::{FieldDefinition, FieldHandler, FieldValue, ListPolicy};
use crate::http_date::parse_http_date;
use crate::note::AddNote;

/// `Date`: when the message was originated.
pub struct Date;

static DEFINITION: FieldDefinition = FieldDefinition {
    canonical_name: "Date",
    description: "The `Date` header represents the time when the message was generated, \
regardless of caching that happened since.

It is used by caches as input to expiration calculations, and to detect clock drift.",
    reference: "https://www.rfc-editor.org/rfc/rfc9110.html#field.date",
    syntax: "Date = HTTP-date",
    list_header: false,
    list_policy: ListPolicy::Occurrence,
    deprecated: false,
    valid_in_requests: true,
    valid_in_responses: true,
};

impl FieldHandler for Date {
    fn definition(&self) -> &'static FieldDefinition {
        &DEFINITION
    }

    fn parse(&self, value: &str, add_note: &mut AddNote<'_>) -> FieldValue {
        let parsed = parse_http_date(value);
        if parsed.is_none() {
            add_note(&BAD_DATE_SYNTAX, &[]);
        }
        FieldValue::Date(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{Expected, FieldTest};
    use crate::registry::Registry;
    use chrono::{TimeZone, Utc};

    #[test]
    fn imf_fixdate() -> anyhow::Result<()> {
        let reg = Registry::standard()?;
        let expected = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        FieldTest::new(
            "Date",
            &[b"Sun, 06 Nov 1994 08:49:37 GMT"],
            Expected::One(FieldValue::Date(Some(expected))),
        )
        .check(&reg)
    }

    #[test]
    fn single_digit_day_is_rejected() -> anyhow::Result<()> {
        let reg = Registry::standard()?;
        FieldTest::new(
            "Date",
            &[b"Sun, 6 Nov 1994 08:49:37 GMT"],
            Expected::One(FieldValue::Date(None)),
        )
        .expect_notes(&[&BAD_DATE_SYNTAX])
        .check(&reg)
    }
}
