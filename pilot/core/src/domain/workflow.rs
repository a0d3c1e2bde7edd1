// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Workflow Dispatch Contract
//
// A workflow is the pluggable execution strategy a pilot runs after
// bootstrap; it owns all actual job handling. The bootstrap reaches it only
// through this name-indexed contract: a closed set of names, a single
// synchronous `run` operation, and a trace report as the outcome.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::context::PilotContext;

/// The closed set of workflow names a pilot can be launched with.
///
/// The same enum backs CLI validation and dispatch, so a name that parses is
/// always dispatchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WorkflowKind {
    #[serde(rename = "generic")]
    Generic,
    #[serde(rename = "generic_hpc")]
    GenericHpc,
    #[serde(rename = "production")]
    Production,
    #[serde(rename = "production_hpc")]
    ProductionHpc,
    #[serde(rename = "analysis")]
    Analysis,
    #[serde(rename = "analysis_hpc")]
    AnalysisHpc,
    #[serde(rename = "eventservice")]
    EventService,
    #[serde(rename = "eventservice_hpc")]
    EventServiceHpc,
}

impl WorkflowKind {
    /// Every member of the closed set, in declaration order.
    pub const ALL: [WorkflowKind; 8] = [
        WorkflowKind::Generic,
        WorkflowKind::GenericHpc,
        WorkflowKind::Production,
        WorkflowKind::ProductionHpc,
        WorkflowKind::Analysis,
        WorkflowKind::AnalysisHpc,
        WorkflowKind::EventService,
        WorkflowKind::EventServiceHpc,
    ];

    /// Stable wire/CLI name of this workflow.
    pub const fn as_str(self) -> &'static str {
        match self {
            WorkflowKind::Generic => "generic",
            WorkflowKind::GenericHpc => "generic_hpc",
            WorkflowKind::Production => "production",
            WorkflowKind::ProductionHpc => "production_hpc",
            WorkflowKind::Analysis => "analysis",
            WorkflowKind::AnalysisHpc => "analysis_hpc",
            WorkflowKind::EventService => "eventservice",
            WorkflowKind::EventServiceHpc => "eventservice_hpc",
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "unknown workflow '{0}', expected one of: generic, generic_hpc, production, \
     production_hpc, analysis, analysis_hpc, eventservice, eventservice_hpc"
)]
pub struct UnknownWorkflow(String);

impl FromStr for WorkflowKind {
    type Err = UnknownWorkflow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownWorkflow(s.to_string()))
    }
}

/// Outcome of a dispatched workflow.
///
/// Produced by the workflow, consumed once by the exit status resolver.
#[derive(Debug, Clone, Serialize)]
pub struct TraceReport {
    /// Number of jobs the workflow processed; zero means it ran cleanly but
    /// had nothing to do.
    pub jobs_processed: u64,

    /// When the workflow took over from the bootstrap.
    pub started_at: DateTime<Utc>,

    /// Set by the workflow when it winds down.
    pub finished_at: Option<DateTime<Utc>>,
}

impl TraceReport {
    pub fn new() -> Self {
        Self {
            jobs_processed: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Count one processed job.
    pub fn record_job(&mut self) {
        self.jobs_processed += 1;
    }

    /// Stamp the report as complete.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}

impl Default for TraceReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability implemented by every execution workflow.
///
/// `run` executes synchronously on the calling thread; a workflow is free to
/// spawn cooperating worker threads internally, which must poll the
/// graceful-stop signal carried by the context to decide when to wind down.
/// Errors are not interpreted here; the dispatcher hands them to the top
/// level unmodified.
pub trait Workflow: Send + Sync {
    /// The name this workflow answers to in the dispatch table.
    fn kind(&self) -> WorkflowKind;

    /// Execute the workflow and return its trace report.
    fn run(&self, ctx: &PilotContext) -> anyhow::Result<TraceReport>;
}
