// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Location Resolution
//
// Turns the queue/resource/site identifiers and the server flags into the
// operational parameters a workflow needs: the fully qualified serving
// endpoint and the site context. Resolution failing is fatal for startup;
// the caller aborts before any workflow is invoked.

use tracing::{debug, error};
use url::Url;

use crate::domain::args::PilotArgs;
use crate::domain::config::PilotConfig;

/// Operational parameters resolved from the invocation.
#[derive(Debug, Clone)]
pub struct SiteLocation {
    /// Fully qualified job server endpoint, port included.
    pub server: Url,

    /// Queue the pilot serves.
    pub queue: String,

    /// Resource identifier for job requests.
    pub resource: String,

    /// Site identifier for job requests.
    pub site: String,
}

/// Resolve the serving endpoint and site context.
///
/// The invocation URL wins when present; otherwise the configured default
/// applies. Returns `None` when no usable endpoint can be derived, with the
/// reason already logged at error level.
pub fn set_location(args: &PilotArgs, config: &PilotConfig) -> Option<SiteLocation> {
    let base = if args.server_url.trim().is_empty() {
        config.server.url.as_str()
    } else {
        args.server_url.as_str()
    };

    let mut server = match Url::parse(base) {
        Ok(url) => url,
        Err(err) => {
            error!("server URL '{base}' does not parse: {err}");
            return None;
        }
    };
    if server.scheme() != "http" && server.scheme() != "https" {
        error!("server URL '{server}' must use http or https");
        return None;
    }
    if server.port().is_none() && server.set_port(Some(args.server_port)).is_err() {
        error!("server URL '{server}' does not accept a port");
        return None;
    }

    debug!(server = %server, queue = %args.queue, site = %args.site, "location resolved");
    Some(SiteLocation {
        server,
        queue: args.queue.clone(),
        resource: args.resource.clone(),
        site: args.site.clone(),
    })
}
