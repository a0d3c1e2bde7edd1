// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Built-in Workflow Units
//
// Thin implementations of the dispatch contract for every name in the
// closed set. Job, payload and data handling components live outside this
// crate and attach behind the `Workflow` seam; what ships here honors the
// contract end to end: observe the graceful-stop signal, log the operating
// context and return a finished trace report.

use tracing::{debug, info, warn};

use crate::domain::context::PilotContext;
use crate::domain::workflow::{TraceReport, Workflow, WorkflowKind};

/// Shared cycle of the built-in units: one report, an early exit when the
/// stop signal is already raised, a finish stamp.
fn run_idle_cycle(name: WorkflowKind, ctx: &PilotContext) -> TraceReport {
    let mut report = TraceReport::new();
    if ctx.graceful_stop.is_set() {
        warn!("graceful stop already requested, '{name}' returns without claiming work");
    } else {
        debug!(
            "'{name}' has {}s of lifetime left",
            ctx.graceful_stop.remaining().as_secs()
        );
    }
    report.finish();
    info!(
        "workflow '{name}' finished, {} job(s) processed",
        report.jobs_processed
    );
    report
}

/// Default workflow: serve the queue until the lifetime runs out.
pub struct GenericWorkflow {
    hpc: bool,
}

impl GenericWorkflow {
    pub fn new() -> Self {
        Self { hpc: false }
    }

    /// HPC variant: worker nodes have no outbound network, the server is
    /// reached through the shared filesystem instead.
    pub fn hpc() -> Self {
        Self { hpc: true }
    }
}

impl Workflow for GenericWorkflow {
    fn kind(&self) -> WorkflowKind {
        if self.hpc {
            WorkflowKind::GenericHpc
        } else {
            WorkflowKind::Generic
        }
    }

    fn run(&self, ctx: &PilotContext) -> anyhow::Result<TraceReport> {
        let args = &ctx.args;
        info!(
            queue = %args.queue,
            resource = %args.resource,
            site = %args.site,
            "generic workflow starting"
        );
        if self.hpc {
            info!("HPC mode: no direct server communication from the worker node");
        } else {
            debug!(server = %ctx.location.server, "job requests will target the resolved endpoint");
        }
        Ok(run_idle_cycle(self.kind(), ctx))
    }
}

/// Production workflow: managed production jobs for the configured queue.
pub struct ProductionWorkflow {
    hpc: bool,
}

impl ProductionWorkflow {
    pub fn new() -> Self {
        Self { hpc: false }
    }

    pub fn hpc() -> Self {
        Self { hpc: true }
    }
}

impl Workflow for ProductionWorkflow {
    fn kind(&self) -> WorkflowKind {
        if self.hpc {
            WorkflowKind::ProductionHpc
        } else {
            WorkflowKind::Production
        }
    }

    fn run(&self, ctx: &PilotContext) -> anyhow::Result<TraceReport> {
        let args = &ctx.args;
        info!(
            queue = %args.queue,
            job_label = %args.job_label,
            "production workflow starting"
        );
        if args.job_label == "ptest" {
            debug!("running with the test job label");
        }
        Ok(run_idle_cycle(self.kind(), ctx))
    }
}

/// Analysis workflow: user analysis jobs, scoped by working/country group.
pub struct AnalysisWorkflow {
    hpc: bool,
}

impl AnalysisWorkflow {
    pub fn new() -> Self {
        Self { hpc: false }
    }

    pub fn hpc() -> Self {
        Self { hpc: true }
    }
}

impl Workflow for AnalysisWorkflow {
    fn kind(&self) -> WorkflowKind {
        if self.hpc {
            WorkflowKind::AnalysisHpc
        } else {
            WorkflowKind::Analysis
        }
    }

    fn run(&self, ctx: &PilotContext) -> anyhow::Result<TraceReport> {
        let args = &ctx.args;
        info!(
            queue = %args.queue,
            working_group = args.working_group.as_deref().unwrap_or("(none)"),
            country_group = args.country_group.as_deref().unwrap_or("(none)"),
            allow_other_country = args.allow_other_country,
            "analysis workflow starting"
        );
        Ok(run_idle_cycle(self.kind(), ctx))
    }
}

/// Event service workflow: fine-grained event processing.
pub struct EventServiceWorkflow {
    hpc: bool,
}

impl EventServiceWorkflow {
    pub fn new() -> Self {
        Self { hpc: false }
    }

    pub fn hpc() -> Self {
        Self { hpc: true }
    }
}

impl Workflow for EventServiceWorkflow {
    fn kind(&self) -> WorkflowKind {
        if self.hpc {
            WorkflowKind::EventServiceHpc
        } else {
            WorkflowKind::EventService
        }
    }

    fn run(&self, ctx: &PilotContext) -> anyhow::Result<TraceReport> {
        let args = &ctx.args;
        info!(
            queue = %args.queue,
            allow_same_user = args.allow_same_user,
            "event service workflow starting"
        );
        Ok(run_idle_cycle(self.kind(), ctx))
    }
}
