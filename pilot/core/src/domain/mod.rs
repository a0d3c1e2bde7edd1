// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain types of the pilot bootstrap: argument model, workflow contract,
//! configuration manifest and the graceful-stop signal.

pub mod args;
pub mod config;
pub mod context;
pub mod stop;
pub mod workflow;
