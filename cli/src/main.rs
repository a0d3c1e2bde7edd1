// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # AEGIS Pilot
//!
//! The `pilot` binary is the worker agent a compute site boots to fetch and
//! execute work on behalf of the orchestrator.
//!
//! ## Startup sequence
//!
//! 1. Parse and validate the invocation flags
//! 2. Create and activate the private work directory
//! 3. Establish the dual-sink logging pipeline
//! 4. Load configuration, set up secure transport, resolve the location
//! 5. Attach the graceful-stop signal and dispatch to the selected workflow
//! 6. Translate the workflow's trace report into the process exit status
//!
//! Failures before step 3 go to the raw error stream; from step 4 on they go
//! through the logging pipeline. Exit codes: 0 = at least one job processed,
//! 20 = ran cleanly with no work, 1 = any startup or dispatch failure.

use std::process;

use clap::Parser;
use colored::Colorize;
use tracing::{error, info};

use aegis_pilot::args::PilotCli;
use aegis_pilot_core::application::bootstrap;
use aegis_pilot_core::application::dispatcher::WorkflowRegistry;
use aegis_pilot_core::application::exit_status::{codes, resolve_exit_status};
use aegis_pilot_core::domain::context::publish_pilot_user;
use aegis_pilot_core::infrastructure::logging::{init_logging, LOG_FILE_NAME};
use aegis_pilot_core::infrastructure::workdir;

fn main() {
    let cli = match PilotCli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too; they keep exit code 0,
            // real parse failures exit with the pilot's failure code.
            let code = if err.use_stderr() {
                codes::FAILURE
            } else {
                codes::SUCCESS
            };
            let _ = err.print();
            process::exit(code);
        }
    };

    let mut args = match cli.into_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", format!("invalid pilot arguments: {err}").red());
            process::exit(codes::FAILURE);
        }
    };

    // Create the main pilot work directory and cd into it. Logging does not
    // exist yet, so failures are reported on the raw error stream.
    let main_work_dir = match workdir::resolve(&args.workdir).and_then(|dir| {
        workdir::create(&dir)?;
        workdir::activate(&dir)?;
        Ok(dir)
    }) {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("{}", format!("{err} - aborting").red());
            process::exit(codes::FAILURE);
        }
    };
    args.set_main_work_dir(main_work_dir.clone());
    publish_pilot_user(&args.pilot_user);

    if let Err(err) = init_logging(args.debug, &main_work_dir.join(LOG_FILE_NAME)) {
        eprintln!("{}", format!("{err} - aborting").red());
        process::exit(codes::FAILURE);
    }
    info!("pilot work directory: {}", main_work_dir.display());

    let registry = WorkflowRegistry::with_builtin();
    let trace = match bootstrap::startup(args, &registry) {
        Ok(trace) => trace,
        Err(err) => {
            error!("pilot startup failed: {err}");
            process::exit(codes::FAILURE);
        }
    };

    let status = resolve_exit_status(trace.as_ref());
    info!("pilot has finished (exit code {})", status.code());
    process::exit(status.code());
}
