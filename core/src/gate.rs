//! The readiness gate itself.
//!
//! One probe in flight at a time, a blocking suspension between attempts,
//! and no way to give up unless an overall bound was asked for. The gate
//! owns the `POLLING -> READY` half of the lifecycle; handing off to the
//! successor process lives in [`crate::handoff`].

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::probe::Probe;
use crate::retry::Backoff;
use gatr_common::error::GateError;

/// Called after each failed attempt with the failure count and the delay
/// about to be slept. Lets the frontend animate progress without the gate
/// knowing anything about terminals.
pub type RetryCallback = Box<dyn Fn(u32, Duration) + Send + Sync>;

/// What the wait cost once the dependency came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyReport {
    /// Total probe attempts, including the successful one.
    pub attempts: u32,
    /// Wall-clock time from first probe to readiness.
    pub waited: Duration,
}

/// Blocks until a probe succeeds, or until an optional overall bound runs out.
pub struct Gate<P> {
    probe: P,
    backoff: Backoff,
    max_wait: Option<Duration>,
    on_retry: Option<RetryCallback>,
}

impl<P: Probe> Gate<P> {
    pub fn new(probe: P, backoff: Backoff) -> Self {
        Self {
            probe,
            backoff,
            max_wait: None,
            on_retry: None,
        }
    }

    /// Bounds the total wait. Without this the gate polls forever, which is
    /// the intended behavior inside a container startup sequence.
    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn on_retry(mut self, callback: RetryCallback) -> Self {
        self.on_retry = Some(callback);
        self
    }

    /// Polls until the dependency is ready.
    ///
    /// Every probe failure is handled the same way: log a retry notice,
    /// sleep the policy's delay, try again. Only an exhausted `max_wait`
    /// surfaces as an error.
    pub async fn wait(&self) -> Result<ReadyReport, GateError> {
        let start = Instant::now();
        let mut failures: u32 = 0;

        loop {
            match self.probe.check().await {
                Ok(()) => {
                    let report = ReadyReport {
                        attempts: failures + 1,
                        waited: start.elapsed(),
                    };
                    info!(
                        "{} is ready after {} attempt(s)",
                        self.probe.endpoint(),
                        report.attempts
                    );
                    return Ok(report);
                }
                Err(err) => {
                    failures += 1;
                    let mut delay = self.backoff.delay(failures - 1);

                    if let Some(limit) = self.max_wait {
                        let waited = start.elapsed();
                        if waited >= limit {
                            return Err(GateError::ProbeTimeout { waited, limit });
                        }
                        // Never sleep past the bound; the next attempt is
                        // the last one.
                        delay = delay.min(limit - waited);
                    }

                    warn!(
                        "{} not ready ({err}), retry #{failures} in {:.1}s",
                        self.probe.endpoint(),
                        delay.as_secs_f64()
                    );
                    if let Some(callback) = &self.on_retry {
                        callback(failures, delay);
                    }
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
