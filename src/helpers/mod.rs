// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Syntax helpers shared by the driver and the field handlers.

pub mod headers;
pub mod token;
