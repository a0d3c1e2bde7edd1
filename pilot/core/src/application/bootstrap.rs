// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Startup Orchestration
//
// The sequential prologue between an activated work directory and the
// dispatched workflow: load configuration, set up secure transport, resolve
// the location, construct and attach the graceful-stop signal, dispatch.
// Runs single-threaded; every failure is terminal for this invocation, no
// step is retried.

use tracing::{error, info};

use crate::application::dispatcher::{DispatchError, WorkflowRegistry};
use crate::domain::args::PilotArgs;
use crate::domain::config::{ConfigError, PilotConfig};
use crate::domain::context::PilotContext;
use crate::domain::stop::GracefulStop;
use crate::domain::workflow::TraceReport;
use crate::infrastructure::https::{https_setup, HttpsError};
use crate::infrastructure::location::set_location;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Https(#[from] HttpsError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Run the startup sequence and the selected workflow.
///
/// `Ok(None)` means startup stopped before any workflow was invoked (the
/// location could not be resolved); the exit status resolver translates that
/// into the failure outcome. Errors from the workflow itself pass through
/// unmodified for the top level to report.
pub fn startup(
    mut args: PilotArgs,
    registry: &WorkflowRegistry,
) -> Result<Option<TraceReport>, StartupError> {
    info!("AEGIS pilot version {}", env!("CARGO_PKG_VERSION"));

    let config = PilotConfig::load_or_default(args.config_path.as_deref())?;
    let https = https_setup(&args, &config)?;

    let Some(location) = set_location(&args, &config) else {
        error!(
            "could not resolve location from queue '{}', resource '{}', site '{}'",
            args.queue, args.resource, args.site
        );
        return Ok(None);
    };

    // Carry the resolved endpoint on the argument model, like the rest of
    // the location context it was derived from.
    args.server_url = location.server.to_string();

    let graceful_stop = GracefulStop::new(args.lifetime_secs);
    info!("graceful stop deadline: {}", graceful_stop.deadline_utc());

    if let Ok(rendered) = serde_json::to_string(&args) {
        info!("pilot arguments: {rendered}");
    }
    info!("selected workflow: {}", args.workflow);

    let kind = args.workflow;
    let ctx = PilotContext {
        args,
        config,
        https,
        location,
        graceful_stop,
    };

    let report = registry.dispatch(kind, &ctx)?;
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use super::*;
    use crate::domain::context::testing::args_fixture;
    use crate::domain::workflow::{Workflow, WorkflowKind};

    struct FixedJobsWorkflow {
        jobs: u64,
    }

    impl Workflow for FixedJobsWorkflow {
        fn kind(&self) -> WorkflowKind {
            WorkflowKind::Generic
        }

        fn run(&self, ctx: &PilotContext) -> anyhow::Result<TraceReport> {
            // The signal must be attached and unset when a workflow starts.
            assert!(!ctx.graceful_stop.is_set());
            let mut report = TraceReport::new();
            for _ in 0..self.jobs {
                report.record_job();
            }
            report.finish();
            Ok(report)
        }
    }

    fn stub_registry(jobs: u64) -> WorkflowRegistry {
        let mut registry = WorkflowRegistry::new();
        registry.register(Arc::new(FixedJobsWorkflow { jobs }));
        registry
    }

    #[test]
    fn test_startup_dispatches_and_returns_the_report() {
        let trace = startup(args_fixture(), &stub_registry(3)).expect("startup");
        assert_eq!(trace.expect("report").jobs_processed, 3);
    }

    #[test]
    fn test_startup_reads_an_explicit_manifest() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "server:\n  url: https://jobs.example.org\n").expect("write");

        let mut args = args_fixture();
        args.config_path = Some(file.path().to_path_buf());

        let trace = startup(args, &stub_registry(1)).expect("startup");
        assert_eq!(trace.expect("report").jobs_processed, 1);
    }

    #[test]
    fn test_unresolvable_location_aborts_before_dispatch() {
        let mut args = args_fixture();
        args.server_url = "not a url".to_string();

        let trace = startup(args, &stub_registry(3)).expect("startup");
        assert!(trace.is_none());
    }

    #[test]
    fn test_broken_manifest_is_a_startup_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "server: [broken").expect("write");

        let mut args = args_fixture();
        args.config_path = Some(file.path().to_path_buf());

        assert!(matches!(
            startup(args, &stub_registry(1)),
            Err(StartupError::Config(_))
        ));
    }

    #[test]
    fn test_empty_registry_is_a_dispatch_error() {
        assert!(matches!(
            startup(args_fixture(), &WorkflowRegistry::new()),
            Err(StartupError::Dispatch(DispatchError::Unregistered(_)))
        ));
    }
}
