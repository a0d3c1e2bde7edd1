// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Graceful-stop signal
//!
//! One shared condition per pilot invocation, cloneable into any worker
//! thread a workflow spawns. The bootstrap only constructs and attaches it;
//! setting it is reserved for a supervisory timer or monitor, which instructs
//! workers to unwind and return their best-effort result instead of being
//! killed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct GracefulStop {
    stop: Arc<AtomicBool>,
    lifetime: Duration,
    deadline: Instant,
    deadline_utc: DateTime<Utc>,
}

impl GracefulStop {
    /// Create an unset signal whose deadline is `lifetime_secs` from now.
    pub fn new(lifetime_secs: u64) -> Self {
        let lifetime = Duration::from_secs(lifetime_secs);
        let delta = chrono::Duration::try_seconds(lifetime_secs.min(i64::MAX as u64) as i64)
            .unwrap_or_else(chrono::Duration::zero);
        let deadline_utc = Utc::now()
            .checked_add_signed(delta)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let now = Instant::now();
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            lifetime,
            deadline: now
                .checked_add(lifetime)
                .unwrap_or_else(|| now + Duration::from_secs(u32::MAX as u64)),
            deadline_utc,
        }
    }

    /// Request cooperative shutdown. Reserved for the supervisory mechanism.
    pub fn set(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Poll point for workers: has shutdown been requested?
    pub fn is_set(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Configured lifetime of this invocation.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Monotonic deadline after which the supervisor is expected to set the
    /// signal.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Wall-clock deadline, for operator-facing logs.
    pub fn deadline_utc(&self) -> DateTime<Utc> {
        self.deadline_utc
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}
