// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Secure-Transport Setup
//
// Configures the certificate material for every HTTPS call the dispatched
// workflow makes: the optional CA bundle and CA directory from the argument
// model are loaded into one shared client. A bundle or directory that was
// requested but cannot be used is fatal for startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::domain::args::PilotArgs;
use crate::domain::config::PilotConfig;

/// Secure-transport material shared with the dispatched workflow.
#[derive(Debug, Clone)]
pub struct HttpsContext {
    /// CA certificate path as supplied on the command line.
    pub cacert: Option<PathBuf>,

    /// CA certificate directory as supplied on the command line.
    pub capath: Option<PathBuf>,

    client: reqwest::blocking::Client,
}

impl HttpsContext {
    /// HTTPS client configured with the pilot's CA material.
    pub fn client(&self) -> &reqwest::blocking::Client {
        &self.client
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HttpsError {
    #[error("CA certificate {path} is not readable: {source}")]
    CaCertUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CA certificate {path} is not valid PEM: {source}")]
    CaCertInvalid {
        path: PathBuf,
        source: reqwest::Error,
    },

    #[error("CA certificate directory {path} is not readable: {source}")]
    CaPathUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to build HTTPS client: {0}")]
    Client(reqwest::Error),
}

/// Build the shared HTTPS client from the argument model and configuration.
pub fn https_setup(args: &PilotArgs, config: &PilotConfig) -> Result<HttpsContext, HttpsError> {
    let mut builder = reqwest::blocking::Client::builder()
        .user_agent(config.pilot.user_agent.clone())
        .connect_timeout(Duration::from_secs(config.pilot.connect_timeout_seconds));

    if let Some(path) = &args.cacert {
        builder = builder.add_root_certificate(load_certificate(path)?);
        debug!("CA certificate loaded from {}", path.display());
    }

    if let Some(dir) = &args.capath {
        let entries = fs::read_dir(dir).map_err(|source| HttpsError::CaPathUnreadable {
            path: dir.clone(),
            source,
        })?;
        let mut loaded = 0usize;
        for entry in entries {
            let entry = entry.map_err(|source| HttpsError::CaPathUnreadable {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("pem") | Some("crt")
            ) {
                builder = builder.add_root_certificate(load_certificate(&path)?);
                loaded += 1;
            }
        }
        debug!("{loaded} CA certificates loaded from {}", dir.display());
    }

    let client = builder.build().map_err(HttpsError::Client)?;
    Ok(HttpsContext {
        cacert: args.cacert.clone(),
        capath: args.capath.clone(),
        client,
    })
}

fn load_certificate(path: &Path) -> Result<reqwest::Certificate, HttpsError> {
    let pem = fs::read(path).map_err(|source| HttpsError::CaCertUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    reqwest::Certificate::from_pem(&pem).map_err(|source| HttpsError::CaCertInvalid {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::testing::args_fixture;

    #[test]
    fn test_setup_without_certificates() {
        let ctx = https_setup(&args_fixture(), &PilotConfig::default()).expect("https context");
        assert!(ctx.cacert.is_none());
        assert!(ctx.capath.is_none());
    }

    #[test]
    fn test_missing_ca_certificate_is_fatal() {
        let mut args = args_fixture();
        args.cacert = Some(PathBuf::from("/nonexistent/proxy.pem"));

        match https_setup(&args, &PilotConfig::default()) {
            Err(HttpsError::CaCertUnreadable { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/proxy.pem"));
            }
            other => panic!("expected CaCertUnreadable, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_ca_certificate_is_fatal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cert = tmp.path().join("broken.pem");
        fs::write(&cert, b"not a certificate").expect("write");

        let mut args = args_fixture();
        args.cacert = Some(cert);

        assert!(matches!(
            https_setup(&args, &PilotConfig::default()),
            Err(HttpsError::CaCertInvalid { .. })
        ));
    }

    #[test]
    fn test_missing_ca_directory_is_fatal() {
        let mut args = args_fixture();
        args.capath = Some(PathBuf::from("/nonexistent/certificates"));

        assert!(matches!(
            https_setup(&args, &PilotConfig::default()),
            Err(HttpsError::CaPathUnreadable { .. })
        ));
    }

    #[test]
    fn test_empty_ca_directory_is_accepted() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut args = args_fixture();
        args.capath = Some(tmp.path().to_path_buf());

        let ctx = https_setup(&args, &PilotConfig::default()).expect("https context");
        assert_eq!(ctx.capath.as_deref(), Some(tmp.path()));
    }
}
