// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Bootstrap context
//!
//! The explicitly constructed object handed to the dispatched workflow:
//! argument model, configuration, secure-transport handle, resolved location
//! and the graceful-stop signal. Assembled stepwise during startup; written
//! once, read-mostly afterwards. The stop signal is the single piece of
//! mutable shared state it carries.

use crate::domain::args::PilotArgs;
use crate::domain::config::PilotConfig;
use crate::domain::stop::GracefulStop;
use crate::infrastructure::https::HttpsContext;
use crate::infrastructure::location::SiteLocation;

/// Environment variable carrying the pilot user for downstream consumers
/// (wrapper scripts, staged payloads) that read the process environment.
pub const PILOT_USER_ENV: &str = "PILOT_USER";

/// Publish the pilot user process-wide.
pub fn publish_pilot_user(pilot_user: &str) {
    std::env::set_var(PILOT_USER_ENV, pilot_user);
}

/// Everything a workflow may consult during its run.
#[derive(Debug, Clone)]
pub struct PilotContext {
    /// Validated invocation parameters, work directory included.
    pub args: PilotArgs,

    /// Loaded configuration manifest, read-only.
    pub config: PilotConfig,

    /// Secure-transport material for HTTPS calls.
    pub https: HttpsContext,

    /// Resolved serving endpoint and site context.
    pub location: SiteLocation,

    /// Cooperative shutdown signal; workers poll, a supervisor sets.
    pub graceful_stop: GracefulStop,
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    use super::PilotContext;
    use crate::domain::args::PilotArgs;
    use crate::domain::config::PilotConfig;
    use crate::domain::stop::GracefulStop;
    use crate::domain::workflow::WorkflowKind;
    use crate::infrastructure::https::https_setup;
    use crate::infrastructure::location::set_location;

    pub(crate) fn args_fixture() -> PilotArgs {
        PilotArgs {
            workdir: PathBuf::from("."),
            debug: false,
            workflow: WorkflowKind::Generic,
            lifetime_secs: 3600,
            queue: "queue-alpha".to_string(),
            resource: "resource-alpha".to_string(),
            site: "site-alpha".to_string(),
            job_label: "ptest".to_string(),
            cacert: None,
            capath: None,
            server_url: String::new(),
            server_port: 25443,
            config_path: None,
            country_group: None,
            working_group: None,
            allow_other_country: false,
            allow_same_user: true,
            pilot_user: "generic".to_string(),
            main_work_dir: None,
        }
    }

    pub(crate) fn context_fixture() -> PilotContext {
        let args = args_fixture();
        let config = PilotConfig::default();
        let https = https_setup(&args, &config).expect("https context");
        let location = set_location(&args, &config).expect("resolved location");
        PilotContext {
            args,
            config,
            https,
            location,
            graceful_stop: GracefulStop::new(3600),
        }
    }
}
