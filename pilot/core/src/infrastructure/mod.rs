// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure concerns of the bootstrap: work directory lifecycle,
//! logging sinks, secure transport and location resolution.

pub mod https;
pub mod location;
pub mod logging;
pub mod workdir;
