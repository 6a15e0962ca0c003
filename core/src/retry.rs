//! Inter-attempt delay policies.
//!
//! The reference behavior is a fixed interval forever. Linear and
//! exponential backoff are available for deployments where hammering a
//! struggling dependency on a fixed beat is unkind; all of them respect a
//! delay cap, and jitter only ever lengthens a delay so the configured
//! interval remains a lower bound between attempts.

use std::str::FromStr;
use std::time::Duration;

use rand::Rng;

/// Exponent clamp so `multiplier^attempt` cannot overflow into nonsense.
const MAX_BACKOFF_EXPONENT: u32 = 10;

/// Growth applied per attempt by the linear policy.
const LINEAR_GROWTH: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackoffKind {
    /// Same delay every attempt (the reference behavior).
    Fixed,
    /// Delay grows by half the base per attempt.
    Linear,
    /// Delay doubles (by default) per attempt.
    Exponential,
}

impl FromStr for BackoffKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "linear" => Ok(Self::Linear),
            "exponential" => Ok(Self::Exponential),
            other => Err(format!(
                "unknown backoff '{other}' (expected fixed, linear or exponential)"
            )),
        }
    }
}

/// Computes the delay before retry attempt `n`.
#[derive(Clone, Debug)]
pub struct Backoff {
    kind: BackoffKind,
    base: Duration,
    cap: Duration,
    multiplier: f64,
    jitter: f64,
}

impl Backoff {
    pub fn new(kind: BackoffKind, base: Duration) -> Self {
        Self {
            kind,
            base,
            cap: Duration::from_secs(300),
            multiplier: 2.0,
            jitter: 0.0,
        }
    }

    /// Upper bound on any computed delay.
    pub fn with_cap(mut self, cap: Duration) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Additive jitter factor in `[0, 1]`: up to `factor * delay` is added.
    pub fn with_jitter(mut self, factor: f64) -> Self {
        self.jitter = factor.clamp(0.0, 1.0);
        self
    }

    /// Delay to sleep after the `attempt`-th consecutive failure (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let base = self.base.as_secs_f64();
        let raw = match self.kind {
            BackoffKind::Fixed => base,
            BackoffKind::Linear => base * (1.0 + LINEAR_GROWTH * f64::from(attempt)),
            BackoffKind::Exponential => {
                base * self.multiplier.powi(attempt.min(MAX_BACKOFF_EXPONENT) as i32)
            }
        };

        let capped = raw.min(self.cap.as_secs_f64());
        Duration::from_secs_f64(self.add_jitter(capped))
    }

    fn add_jitter(&self, delay: f64) -> f64 {
        if self.jitter <= 0.0 {
            return delay;
        }
        delay + delay * rand::rng().random_range(0.0..=self.jitter)
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
