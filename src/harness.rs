// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Declarative fixtures that exercise one field handler in isolation.
//!
//! A [`FieldTest`] feeds raw byte values straight into a handler through
//! [`Registry::invoke`], skipping the driver, and compares the parsed values
//! and notes against expectations.

use crate::exchange::{Exchange, Mode};
use crate::fields::notes::BAD_SYNTAX;
use crate::fields::FieldValue;
use crate::note::{Level, Note, NoteKind};
use crate::registry::Registry;

/// Expected parse result of a fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Single-value field: the value parsed from the only input.
    One(FieldValue),
    /// List field: every value in occurrence order.
    Many(Vec<FieldValue>),
}

/// One fixture for one field.
#[derive(Debug)]
pub struct FieldTest<'a> {
    /// Field under test, matched case-insensitively.
    pub name: &'a str,
    /// Raw values, one per simulated occurrence.
    pub inputs: &'a [&'a [u8]],
    pub expected_out: Expected,
    /// Kinds that must each be emitted at least once.
    pub expected_err: &'a [&'static NoteKind],
    /// Kinds that must not be emitted, whatever their level.
    pub disallowed: &'a [&'static NoteKind],
}

/// What a fixture produced.
#[derive(Debug, Clone)]
pub struct FieldOutcome {
    pub values: Vec<FieldValue>,
    pub notes: Vec<Note>,
}

impl<'a> FieldTest<'a> {
    pub fn new(name: &'a str, inputs: &'a [&'a [u8]], expected_out: Expected) -> Self {
        Self {
            name,
            inputs,
            expected_out,
            expected_err: &[],
            disallowed: &[],
        }
    }

    pub fn expect_notes(mut self, kinds: &'a [&'static NoteKind]) -> Self {
        self.expected_err = kinds;
        self
    }

    pub fn disallow(mut self, kinds: &'a [&'static NoteKind]) -> Self {
        self.disallowed = kinds;
        self
    }

    /// Run the handler over every input and collect what it produced.
    ///
    /// Inputs that are not UTF-8 are decoded lossily and reported as
    /// BAD_SYNTAX, as the driver does.
    pub fn outcome(&self, registry: &Registry) -> crate::Result<FieldOutcome> {
        let handler = registry.get(self.name).ok_or_else(|| crate::Error::UnknownField {
            name: self.name.to_string(),
        })?;
        let def = handler.definition();
        let mode = if def.valid_in_responses {
            Mode::Response
        } else {
            Mode::Request
        };

        let mut exchange = Exchange::new(mode, None);
        let mut values = Vec::new();
        for raw in self.inputs {
            let mut sink = |kind: &'static NoteKind, params: &[(&str, &str)]| {
                exchange.add_note(kind, params);
            };
            let value = match std::str::from_utf8(raw) {
                Ok(s) => s.to_string(),
                Err(_) => {
                    sink(&BAD_SYNTAX, &[("field_name", def.canonical_name)]);
                    String::from_utf8_lossy(raw).into_owned()
                }
            };
            values.extend(registry.invoke(self.name, mode, value.trim(), &mut sink)?);
        }

        let notes = exchange.notes().to_vec();
        Ok(FieldOutcome { values, notes })
    }

    /// Run the fixture and fail with a description of the first mismatch.
    ///
    /// Unexpected notes only fail the fixture when they are at BAD level or
    /// listed in `disallowed`.
    pub fn check(&self, registry: &Registry) -> anyhow::Result<()> {
        let outcome = self.outcome(registry)?;

        match &self.expected_out {
            Expected::One(expected) => {
                if outcome.values.len() != 1 || &outcome.values[0] != expected {
                    anyhow::bail!(
                        "{}: expected {:?}, got {:?}",
                        self.name,
                        expected,
                        outcome.values
                    );
                }
            }
            Expected::Many(expected) => {
                if &outcome.values != expected {
                    anyhow::bail!(
                        "{}: expected {:?}, got {:?}",
                        self.name,
                        expected,
                        outcome.values
                    );
                }
            }
        }

        for kind in self.expected_err {
            if !outcome.notes.iter().any(|n| n.kind() == *kind) {
                anyhow::bail!("{}: expected note {} was not emitted", self.name, kind.name);
            }
        }

        for note in &outcome.notes {
            let kind = note.kind();
            let expected = self.expected_err.iter().any(|k| *k == kind);
            if self.disallowed.iter().any(|k| *k == kind) {
                anyhow::bail!("{}: disallowed note {} was emitted", self.name, kind.name);
            }
            if !expected && kind.level == Level::Bad {
                anyhow::bail!("{}: unexpected note {} was emitted", self.name, kind.name);
            }
            // every note has to be renderable with the parameters it carries
            note.render()?;
        }

        Ok(())
    }
}
