// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! AEGIS pilot core
//!
//! Bootstrap and dispatch layer for the pilot agent: argument model, work
//! directory lifecycle, logging bootstrap, configuration, cooperative
//! shutdown signal, workflow dispatch and exit status resolution.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Everything the `pilot` binary needs between process start
//!   and handing control to a workflow.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
