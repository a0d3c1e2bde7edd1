// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Work Directory Manager
//
// One private directory on local storage per pilot invocation, exclusively
// owned by the process for its lifetime. `resolve` picks a per-invocation
// unique path under the caller-supplied base, `create` materializes it and
// `activate` makes it the process working directory. Failures here happen
// before logging exists and must be reported on the raw error stream by the
// caller.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Environment variable carrying the active work directory for downstream
/// consumers (file staging, log placement).
pub const PILOT_HOME_ENV: &str = "PILOT_HOME";

#[derive(Debug, thiserror::Error)]
pub enum WorkDirError {
    #[error("Cannot determine the current directory: {0}")]
    CurrentDir(std::io::Error),

    #[error("Work directory path {0} exists and is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to create work directory {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to activate work directory {path}: {source}")]
    Activate {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Compute the absolute work directory for this invocation.
///
/// The uuid leaf keeps concurrent pilots under the same base from ever
/// sharing a directory. No filesystem mutation happens here.
pub fn resolve(base: &Path) -> Result<PathBuf, WorkDirError> {
    let base = if base.is_absolute() {
        base.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(WorkDirError::CurrentDir)?
            .join(base)
    };
    Ok(base.join(format!("pilot-{}", Uuid::new_v4().simple())))
}

/// Create the work directory and any missing parents.
///
/// An already existing directory is accepted; a path occupied by anything
/// else is not.
pub fn create(path: &Path) -> Result<(), WorkDirError> {
    if path.exists() && !path.is_dir() {
        return Err(WorkDirError::NotADirectory(path.to_path_buf()));
    }
    std::fs::create_dir_all(path).map_err(|source| WorkDirError::Create {
        path: path.to_path_buf(),
        source,
    })
}

/// Change into the work directory and publish it process-wide.
pub fn activate(path: &Path) -> Result<(), WorkDirError> {
    std::env::set_current_dir(path).map_err(|source| WorkDirError::Activate {
        path: path.to_path_buf(),
        source,
    })?;
    std::env::set_var(PILOT_HOME_ENV, path);
    Ok(())
}
