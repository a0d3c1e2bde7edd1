// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Pilot Argument Model
//
// Validated, immutable snapshot of the invocation parameters. Constructed
// once at startup from the CLI surface, enriched with the resolved main work
// directory, then passed by reference into the workflow dispatcher.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::workflow::WorkflowKind;

/// Invocation parameters of one pilot run.
#[derive(Debug, Clone, Serialize)]
pub struct PilotArgs {
    /// Base path under which the private work directory is created.
    pub workdir: PathBuf,

    /// Enable debug mode for logging messages.
    pub debug: bool,

    /// Selected execution workflow.
    pub workflow: WorkflowKind,

    /// Hard lifetime limit in seconds; the graceful-stop deadline.
    pub lifetime_secs: u64,

    /// Queue name the pilot serves.
    pub queue: String,

    /// Resource name, needed by the job dispatcher.
    pub resource: String,

    /// Site name, needed by the job dispatcher.
    pub site: String,

    /// Job prod/source label.
    pub job_label: String,

    /// CA certificate used with HTTPS calls to the server, commonly an
    /// X509 proxy.
    pub cacert: Option<PathBuf>,

    /// Directory of CA certificates.
    pub capath: Option<PathBuf>,

    /// Job server URL; empty means the configured default applies.
    pub server_url: String,

    /// Job server port.
    pub server_port: u16,

    /// Optional configuration manifest path.
    pub config_path: Option<PathBuf>,

    /// Country group option for job requests.
    pub country_group: Option<String>,

    /// Working group option for job requests.
    pub working_group: Option<String>,

    /// Whether the resource may be used outside the privileged group.
    pub allow_other_country: bool,

    /// Whether multi-jobs are restricted to the same task and user.
    pub allow_same_user: bool,

    /// Pilot user, e.g. the name of the experiment.
    pub pilot_user: String,

    /// Resolved main work directory; filled in once the directory exists.
    pub main_work_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("required argument '{0}' must not be empty")]
    Empty(&'static str),

    #[error("pilot lifetime must be a positive number of seconds")]
    NonPositiveLifetime,
}

impl PilotArgs {
    /// Check the invariants the CLI parser cannot express: mandatory strings
    /// must carry actual content and the lifetime must be positive.
    pub fn validate(&self) -> Result<(), ArgsError> {
        let mandatory: [(&'static str, &str); 4] = [
            ("queue", &self.queue),
            ("resource", &self.resource),
            ("site", &self.site),
            ("pilot-user", &self.pilot_user),
        ];
        for (name, value) in mandatory {
            if value.trim().is_empty() {
                return Err(ArgsError::Empty(name));
            }
        }
        if self.lifetime_secs == 0 {
            return Err(ArgsError::NonPositiveLifetime);
        }
        Ok(())
    }

    /// Record the created work directory on the model.
    pub fn set_main_work_dir(&mut self, dir: PathBuf) {
        self.main_work_dir = Some(dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::testing::args_fixture;

    #[test]
    fn test_fixture_passes_validation() {
        args_fixture().validate().expect("valid args");
    }

    #[test]
    fn test_empty_mandatory_strings_fail_validation() {
        for field in ["queue", "resource", "site", "pilot-user"] {
            let mut args = args_fixture();
            match field {
                "queue" => args.queue = "  ".to_string(),
                "resource" => args.resource = String::new(),
                "site" => args.site = String::new(),
                _ => args.pilot_user = String::new(),
            }
            assert_eq!(args.validate(), Err(ArgsError::Empty(field)));
        }
    }

    #[test]
    fn test_zero_lifetime_fails_validation() {
        let mut args = args_fixture();
        args.lifetime_secs = 0;
        assert_eq!(args.validate(), Err(ArgsError::NonPositiveLifetime));
    }

    #[test]
    fn test_args_serialize_for_the_startup_log() {
        let rendered = serde_json::to_string(&args_fixture()).expect("serialize args");
        assert!(rendered.contains("\"workflow\":\"generic\""));
        assert!(rendered.contains("\"queue\":\"queue-alpha\""));
    }
}
