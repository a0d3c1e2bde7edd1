// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Flag surface of the `pilot` binary
//!
//! One flat set of flags, no subcommands: a pilot is launched once by the
//! batch system and runs to completion. Parsing feeds the validated
//! argument model in the core crate.

use std::path::PathBuf;

use clap::Parser;

use aegis_pilot_core::domain::args::{ArgsError, PilotArgs};
use aegis_pilot_core::domain::workflow::WorkflowKind;

/// AEGIS pilot agent - fetches and executes site work on behalf of the
/// orchestrator
#[derive(Debug, Parser)]
#[command(name = "pilot")]
#[command(version, about, long_about = None)]
pub struct PilotCli {
    /// Pilot work directory base (the private work directory is created
    /// underneath)
    #[arg(short = 'a', value_name = "DIR", default_value = ".")]
    pub workdir: PathBuf,

    /// Enable debug mode for logging messages
    #[arg(short = 'd')]
    pub debug: bool,

    /// Pilot workflow: generic, generic_hpc, production, production_hpc,
    /// analysis, analysis_hpc, eventservice or eventservice_hpc
    #[arg(short = 'w', value_name = "NAME", default_value = "generic")]
    pub workflow: WorkflowKind,

    /// Pilot lifetime in seconds
    #[arg(short = 'l', value_name = "SECONDS", default_value_t = 3600)]
    pub lifetime: u64,

    /// MANDATORY: queue name (e.g. SITE_TEST-batch)
    #[arg(short = 'q', value_name = "QUEUE")]
    pub queue: String,

    /// MANDATORY: resource name (e.g. SITE_TEST)
    #[arg(short = 'r', value_name = "RESOURCE")]
    pub resource: String,

    /// MANDATORY: site name (e.g. SITE_TEST)
    #[arg(short = 's', value_name = "SITE")]
    pub site: String,

    /// Job prod/source label
    #[arg(short = 'j', value_name = "LABEL", default_value = "ptest")]
    pub job_label: String,

    /// CA certificate to use with HTTPS calls to the server, commonly an
    /// X509 proxy
    #[arg(long, value_name = "path/to/your/certificate")]
    pub cacert: Option<PathBuf>,

    /// CA certificates directory
    #[arg(long, value_name = "path/to/certificates/")]
    pub capath: Option<PathBuf>,

    /// Job server URL (the proper default is stored in the config manifest)
    #[arg(long, value_name = "URL", default_value = "")]
    pub url: String,

    /// Job server port
    #[arg(short = 'p', value_name = "PORT", default_value_t = 25443)]
    pub port: u16,

    /// Config manifest path
    #[arg(long, value_name = "path/to/pilot.yaml")]
    pub config: Option<PathBuf>,

    /// Country group option for job requests
    #[arg(long = "country-group", value_name = "GROUP")]
    pub country_group: Option<String>,

    /// Working group option for job requests
    #[arg(long = "working-group", value_name = "GROUP")]
    pub working_group: Option<String>,

    /// Is the resource allowed to be used outside the privileged group?
    #[arg(long = "allow-other-country")]
    pub allow_other_country: bool,

    /// Multi-jobs will only come from the same task (and thus the same user)
    #[arg(
        long = "allow-same-user",
        value_name = "BOOL",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub allow_same_user: bool,

    /// MANDATORY: pilot user, e.g. the name of the experiment
    #[arg(long = "pilot-user", value_name = "USER")]
    pub pilot_user: String,
}

impl PilotCli {
    /// Convert the parsed flags into the validated argument model.
    pub fn into_args(self) -> Result<PilotArgs, ArgsError> {
        let args = PilotArgs {
            workdir: self.workdir,
            debug: self.debug,
            workflow: self.workflow,
            lifetime_secs: self.lifetime,
            queue: self.queue,
            resource: self.resource,
            site: self.site,
            job_label: self.job_label,
            cacert: self.cacert,
            capath: self.capath,
            server_url: self.url,
            server_port: self.port,
            config_path: self.config,
            country_group: self.country_group,
            working_group: self.working_group,
            allow_other_country: self.allow_other_country,
            allow_same_user: self.allow_same_user,
            pilot_user: self.pilot_user,
            main_work_dir: None,
        };
        args.validate()?;
        Ok(args)
    }
}
