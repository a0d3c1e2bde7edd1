// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! End-to-end startup scenarios: the full bootstrap with a stub workflow
//! in-process, and the real binary for the no-work and validation-failure
//! paths.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use aegis_pilot_core::application::bootstrap;
use aegis_pilot_core::application::dispatcher::WorkflowRegistry;
use aegis_pilot_core::application::exit_status::{codes, resolve_exit_status, ExitStatus};
use aegis_pilot_core::domain::args::PilotArgs;
use aegis_pilot_core::domain::context::PilotContext;
use aegis_pilot_core::domain::workflow::{TraceReport, Workflow, WorkflowKind};
use aegis_pilot_core::infrastructure::logging::LOG_FILE_NAME;

const CONFIG_MANIFEST: &str = "server:\n  url: https://jobs.example.org\n";

fn pilot_args(workdir: &Path, config: &Path) -> PilotArgs {
    PilotArgs {
        workdir: workdir.to_path_buf(),
        debug: false,
        workflow: WorkflowKind::Generic,
        lifetime_secs: 3600,
        queue: "queue-1".to_string(),
        resource: "resource-1".to_string(),
        site: "site-1".to_string(),
        job_label: "ptest".to_string(),
        cacert: None,
        capath: None,
        server_url: String::new(),
        server_port: 25443,
        config_path: Some(config.to_path_buf()),
        country_group: None,
        working_group: None,
        allow_other_country: false,
        allow_same_user: true,
        pilot_user: "generic".to_string(),
        main_work_dir: None,
    }
}

struct FixedJobsWorkflow {
    jobs: u64,
}

impl Workflow for FixedJobsWorkflow {
    fn kind(&self) -> WorkflowKind {
        WorkflowKind::Generic
    }

    fn run(&self, _ctx: &PilotContext) -> anyhow::Result<TraceReport> {
        let mut report = TraceReport::new();
        for _ in 0..self.jobs {
            report.record_job();
        }
        report.finish();
        Ok(report)
    }
}

#[test]
fn test_startup_with_processed_jobs_resolves_to_exit_zero() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("pilot.yaml");
    fs::write(&config, CONFIG_MANIFEST).expect("write config");

    let mut registry = WorkflowRegistry::new();
    registry.register(Arc::new(FixedJobsWorkflow { jobs: 3 }));

    let trace = bootstrap::startup(pilot_args(tmp.path(), &config), &registry).expect("startup");
    let status = resolve_exit_status(trace.as_ref());

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(status.code(), 0);
}

#[test]
fn test_binary_exits_with_the_no_jobs_code_when_nothing_is_claimed() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("pilot.yaml");
    fs::write(&config, CONFIG_MANIFEST).expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_pilot"))
        .args([
            "-a",
            tmp.path().to_str().expect("utf8 path"),
            "-q",
            "queue-1",
            "-r",
            "resource-1",
            "-s",
            "site-1",
            "--pilot-user",
            "generic",
            "--config",
            config.to_str().expect("utf8 path"),
        ])
        .output()
        .expect("spawn pilot");

    assert_eq!(output.status.code(), Some(codes::ERRNO_NOJOBS));

    // The work directory was created under the base and carries the log.
    let work_dir = fs::read_dir(tmp.path())
        .expect("read base dir")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with("pilot-"))
        })
        .expect("pilot work directory");
    assert!(work_dir.join(LOG_FILE_NAME).is_file());
}

#[test]
fn test_binary_aborts_before_any_state_when_queue_is_missing() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let output = Command::new(env!("CARGO_BIN_EXE_pilot"))
        .args([
            "-a",
            tmp.path().to_str().expect("utf8 path"),
            "-r",
            "resource-1",
            "-s",
            "site-1",
            "--pilot-user",
            "generic",
        ])
        .output()
        .expect("spawn pilot");

    assert_eq!(output.status.code(), Some(codes::FAILURE));
    assert!(!output.stderr.is_empty());
    // No work directory, no log file.
    assert_eq!(fs::read_dir(tmp.path()).expect("read base dir").count(), 0);
}

#[test]
fn test_binary_help_exits_zero() {
    let output = Command::new(env!("CARGO_BIN_EXE_pilot"))
        .arg("--help")
        .output()
        .expect("spawn pilot");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("-q"));
}
