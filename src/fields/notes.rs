// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Notes shared by several fields.
//!
//! `field_name` is supplied by whoever invokes the handler.

use crate::note::{Category, Level, NoteKind};

pub static BAD_SYNTAX: NoteKind = NoteKind {
    name: "BAD_SYNTAX",
    category: Category::General,
    level: Level::Bad,
    summary: "The {field_name} header's syntax isn't valid.",
    text: "The value for this field doesn't conform to its specified syntax; see \
its definition for more information.",
};

pub static BAD_FIELD_LINE: NoteKind = NoteKind {
    name: "BAD_FIELD_LINE",
    category: Category::General,
    level: Level::Bad,
    summary: "{message} has a header line that can't be parsed.",
    text: "The line `{line}` isn't a valid header field. A field line is a field name \
(a token), a colon and the value, with no whitespace before the colon. The line was ignored; \
other implementations may reject the message or interpret it differently.",
};

pub static DUPLICATE_FIELD: NoteKind = NoteKind {
    name: "DUPLICATE_FIELD",
    category: Category::General,
    level: Level::Bad,
    summary: "Only one {field_name} header is allowed in a {mode}.",
    text: "This header is designed to only occur once in a message. When it occurs more \
than once, a receiver needs to choose the one to use, which can lead to interoperability \
problems, since different implementations may make different choices.

Here, the {kept} occurrence was used.",
};

pub static FIELD_WRONG_CONTEXT: NoteKind = NoteKind {
    name: "FIELD_WRONG_CONTEXT",
    category: Category::General,
    level: Level::Warn,
    summary: "The {field_name} header is not meaningful in a {mode}.",
    text: "This header is only defined for the other message direction, so its value was \
not analyzed and will likely be ignored by the recipient.",
};

pub static FIELD_DEPRECATED: NoteKind = NoteKind {
    name: "FIELD_DEPRECATED",
    category: Category::General,
    level: Level::Warn,
    summary: "The {field_name} header is deprecated.",
    text: "This header field is no longer recommended for use, because of \
interoperability problems and/or lack of use. See {reference} for more information.",
};

pub static BAD_DATE_SYNTAX: NoteKind = NoteKind {
    name: "BAD_DATE_SYNTAX",
    category: Category::General,
    level: Level::Bad,
    summary: "The {field_name} header's value isn't a valid date.",
    text: "HTTP dates have specific syntax, and sending an invalid date can cause a \
number of problems, especially with caching. Common problems include sending \"1 May\" \
instead of \"01 May\" (the month is a fixed-width field), and sending a date in a \
timezone other than GMT.",
};
