// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! One captured request or response under analysis.

use crate::fields::FieldValue;
use crate::note::{Note, NoteKind, NoteParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Whether the message being analyzed is a request or a response.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Request,
    #[default]
    Response,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Request => f.write_str("request"),
            Mode::Response => f.write_str("response"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "request" => Ok(Mode::Request),
            "response" => Ok(Mode::Response),
            other => Err(format!("unknown input mode '{}'", other)),
        }
    }
}

/// Notes and parsed values collected for one message.
///
/// Owned by exactly one driver; nothing here is shared between exchanges.
#[derive(Debug, Clone)]
pub struct Exchange {
    mode: Mode,
    now: Option<DateTime<Utc>>,
    defaults: NoteParams,
    notes: Vec<Note>,
    fields: HashMap<&'static str, Vec<FieldValue>>,
    unanalyzed: Vec<(String, String)>,
}

impl Exchange {
    pub fn new(mode: Mode, now: Option<DateTime<Utc>>) -> Self {
        let mut defaults = NoteParams::new();
        let message = match mode {
            Mode::Request => "This request",
            Mode::Response => "This response",
        };
        defaults.insert("message".into(), message.into());
        defaults.insert("mode".into(), mode.to_string());
        Self {
            mode,
            now,
            defaults,
            notes: Vec::new(),
            fields: HashMap::new(),
            unanalyzed: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Reference timestamp the exchange is assumed to have happened at.
    pub fn now(&self) -> Option<DateTime<Utc>> {
        self.now
    }

    /// Append a note built from the exchange defaults merged with `params`.
    /// Call-site parameters win over defaults.
    pub fn add_note(&mut self, kind: &'static NoteKind, params: &[(&str, &str)]) {
        let mut merged = self.defaults.clone();
        for (k, v) in params {
            merged.insert((*k).to_string(), (*v).to_string());
        }
        self.notes.push(Note::new(kind, merged));
    }

    /// Notes in emission order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Parsed values for a field, in occurrence order.
    pub fn field(&self, canonical_name: &str) -> Option<&[FieldValue]> {
        self.fields.get(canonical_name).map(Vec::as_slice)
    }

    /// First parsed value for a field.
    pub fn first(&self, canonical_name: &str) -> Option<&FieldValue> {
        self.field(canonical_name).and_then(|v| v.first())
    }

    /// Fields that had no registered handler, as `(name, value)` pairs.
    pub fn unanalyzed(&self) -> &[(String, String)] {
        &self.unanalyzed
    }

    pub(crate) fn set_now(&mut self, now: DateTime<Utc>) {
        self.now = Some(now);
    }

    pub(crate) fn has_field(&self, canonical_name: &str) -> bool {
        self.fields.contains_key(canonical_name)
    }

    pub(crate) fn push_value(&mut self, canonical_name: &'static str, value: FieldValue) {
        self.fields.entry(canonical_name).or_default().push(value);
    }

    pub(crate) fn replace_value(&mut self, canonical_name: &'static str, value: FieldValue) {
        self.fields.insert(canonical_name, vec![value]);
    }

    pub(crate) fn push_unanalyzed(&mut self, name: String, value: String) {
        self.unanalyzed.push((name, value));
    }
}
