// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Immutable lookup of field handlers by case-insensitive name.

use crate::error::{Error, Result};
use crate::exchange::Mode;
use crate::fields::{FieldDefinition, FieldHandler, FieldValue, FIELDS};
use crate::note::{AddNote, NoteKind};
use std::collections::HashMap;

/// Handlers indexed by lowercased field name.
///
/// Built once from an explicit list and never mutated afterwards, so it can
/// be shared freely between drivers.
pub struct Registry {
    handlers: Vec<&'static dyn FieldHandler>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry from `handlers`, keeping their order.
    ///
    /// Fails when two handlers share a canonical name (ignoring case).
    pub fn new(handlers: &[&'static dyn FieldHandler]) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(handlers.len());
        for (idx, handler) in handlers.iter().enumerate() {
            let name = handler.definition().canonical_name;
            if by_name.insert(name.to_ascii_lowercase(), idx).is_some() {
                return Err(Error::DuplicateDefinition { name });
            }
        }
        tracing::debug!(count = handlers.len(), "field registry built");
        Ok(Self {
            handlers: handlers.to_vec(),
            by_name,
        })
    }

    /// Registry holding every handler shipped with the crate.
    pub fn standard() -> Result<Self> {
        Self::new(FIELDS)
    }

    pub fn get(&self, name: &str) -> Option<&'static dyn FieldHandler> {
        self.by_name
            .get(&name.to_ascii_lowercase())
            .map(|&idx| self.handlers[idx])
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Field definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &'static FieldDefinition> + '_ {
        self.handlers.iter().map(|h| h.definition())
    }

    /// Every note kind that analysis with this registry can emit.
    pub fn note_kinds(&self) -> Vec<&'static NoteKind> {
        let mut kinds: Vec<&'static NoteKind> = crate::driver::DRIVER_NOTES.to_vec();
        for handler in &self.handlers {
            for kind in handler.notes() {
                if !kinds.iter().any(|k| k.name == kind.name) {
                    kinds.push(kind);
                }
            }
        }
        kinds
    }

    /// Parse one occurrence of `name` in `mode`, outside of any driver.
    ///
    /// Unlike the driver, which screens fields first, this treats an unknown
    /// field or a field that is invalid in `mode` as a caller error. Notes
    /// are passed to `add_note` with `field_name` set to the canonical name.
    pub fn invoke(
        &self,
        name: &str,
        mode: Mode,
        value: &str,
        add_note: &mut AddNote<'_>,
    ) -> Result<Vec<FieldValue>> {
        let handler = self.get(name).ok_or_else(|| Error::UnknownField {
            name: name.to_string(),
        })?;
        let def = handler.definition();
        if !def.valid_in(mode) {
            return Err(Error::InvalidContext {
                field: def.canonical_name,
                mode,
            });
        }

        let field_name = def.canonical_name;
        let mut named = |kind: &'static NoteKind, params: &[(&str, &str)]| {
            let mut merged = Vec::with_capacity(params.len() + 1);
            merged.push(("field_name", field_name));
            merged.extend_from_slice(params);
            add_note(kind, &merged);
        };
        Ok(handler.parse_occurrence(value, &mut named))
    }
}
