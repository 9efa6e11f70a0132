// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Per-field diagnostics for captured HTTP messages.
//!
//! A [`driver::Driver`] receives framed field lines for one request or
//! response, hands each field to the handler registered for it in a
//! [`registry::Registry`] and collects the parsed values and [`note::Note`]s
//! in an [`exchange::Exchange`].

pub mod config;
pub mod driver;
pub mod error;
pub mod exchange;
pub mod fields;
pub mod harness;
pub mod helpers;
pub mod http_date;
pub mod input;
pub mod note;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::{Error, Result};
