// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Contract violations raised by the library.
//!
//! These indicate a defect in the calling code, never a problem with the
//! analyzed message. Problems with the message are reported as notes.

use crate::exchange::Mode;

/// All the ways the library can refuse a call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No handler is registered under the given field name.
    #[error("no handler registered for field `{name}`")]
    UnknownField { name: String },

    /// The field is registered but not valid in the current mode.
    #[error("field `{field}` is not valid in a {mode}")]
    InvalidContext { field: &'static str, mode: Mode },

    /// Two handlers were registered with the same (case-insensitive) name.
    #[error("field `{name}` registered more than once")]
    DuplicateDefinition { name: &'static str },

    /// An operation was invoked in a driver state that does not allow it.
    #[error("`{operation}` is not allowed while {state}")]
    InvalidState {
        operation: &'static str,
        state: crate::driver::State,
    },

    /// A note template references parameters that the note does not carry.
    #[error("note {note} is missing template parameters: {}", missing.join(", "))]
    MissingParams {
        note: &'static str,
        missing: Vec<String>,
    },

    /// A note template contains a brace that opens or closes nothing.
    #[error("note {note} has an unbalanced template")]
    UnbalancedTemplate { note: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
