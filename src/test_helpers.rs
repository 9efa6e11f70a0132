// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Shared test utilities to reduce duplication across test modules.

use crate::driver::Driver;
use crate::exchange::Exchange;
use crate::registry::Registry;

/// Registry with every shipped handler.
pub fn make_test_registry() -> Registry {
    Registry::standard().expect("shipped handlers have unique names")
}

/// Feed each `Name: value` line to the driver.
pub fn feed_headers(driver: &mut Driver<'_>, lines: &[&str]) -> crate::Result<()> {
    for line in lines {
        driver.header_line(line.as_bytes())?;
    }
    Ok(())
}

/// Note kind names in emission order.
pub fn note_names(exchange: &Exchange) -> Vec<&'static str> {
    exchange.notes().iter().map(|n| n.kind().name).collect()
}
