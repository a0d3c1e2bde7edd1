// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Workflow Dispatcher
//
// Static mapping from the enumerated workflow name to the unit implementing
// it. CLI validation and this table share the same closed set, so a name
// that parsed always resolves; an unregistered name at dispatch time means
// the registry and validation went out of sync, which fails loudly instead
// of silently doing nothing.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::application::workflows::{
    AnalysisWorkflow, EventServiceWorkflow, GenericWorkflow, ProductionWorkflow,
};
use crate::domain::context::PilotContext;
use crate::domain::workflow::{TraceReport, Workflow, WorkflowKind};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("No workflow registered for '{0}' - dispatch table and validation are out of sync")]
    Unregistered(WorkflowKind),

    #[error("Workflow '{kind}' failed: {source}")]
    Workflow {
        kind: WorkflowKind,
        #[source]
        source: anyhow::Error,
    },
}

/// Handler table for workflow dispatch.
pub struct WorkflowRegistry {
    handlers: HashMap<WorkflowKind, Arc<dyn Workflow>>,
}

impl WorkflowRegistry {
    /// An empty registry; callers register their own units.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry covering the whole closed set with the built-in units.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GenericWorkflow::new()));
        registry.register(Arc::new(GenericWorkflow::hpc()));
        registry.register(Arc::new(ProductionWorkflow::new()));
        registry.register(Arc::new(ProductionWorkflow::hpc()));
        registry.register(Arc::new(AnalysisWorkflow::new()));
        registry.register(Arc::new(AnalysisWorkflow::hpc()));
        registry.register(Arc::new(EventServiceWorkflow::new()));
        registry.register(Arc::new(EventServiceWorkflow::hpc()));
        registry
    }

    /// Register a unit under the name it answers to. A later registration
    /// for the same name replaces the earlier one.
    pub fn register(&mut self, workflow: Arc<dyn Workflow>) {
        self.handlers.insert(workflow.kind(), workflow);
    }

    /// Resolve a name to its unit.
    pub fn resolve(&self, kind: WorkflowKind) -> Result<&Arc<dyn Workflow>, DispatchError> {
        self.handlers
            .get(&kind)
            .ok_or(DispatchError::Unregistered(kind))
    }

    /// Invoke the named workflow synchronously and return its report
    /// unmodified. Workflow errors are not caught here.
    pub fn dispatch(
        &self,
        kind: WorkflowKind,
        ctx: &PilotContext,
    ) -> Result<TraceReport, DispatchError> {
        let workflow = self.resolve(kind)?;
        info!("dispatching to workflow '{kind}'");
        workflow
            .run(ctx)
            .map_err(|source| DispatchError::Workflow { kind, source })
    }
}

impl Default for WorkflowRegistry {
    fn default() -> Self {
        Self::new()
    }
}
