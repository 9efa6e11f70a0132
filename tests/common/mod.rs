// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

#![allow(dead_code)]

use httplint::driver::Policy;
use httplint::exchange::{Exchange, Mode};
use httplint::registry::Registry;

pub fn registry() -> anyhow::Result<Registry> {
    Ok(Registry::standard()?)
}

/// Analyze a full captured message with the default policy.
pub fn analyze(raw: &[u8], mode: Mode) -> anyhow::Result<Exchange> {
    let reg = registry()?;
    Ok(httplint::input::analyze(&reg, raw, mode, None, Policy::default())?)
}

/// Note kind names in emission order.
pub fn names(exchange: &Exchange) -> Vec<&'static str> {
    exchange.notes().iter().map(|n| n.kind().name).collect()
}
