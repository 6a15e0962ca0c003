use clap::Parser;

use gatr_common::target::ProbeTarget;
use gatr_core::retry::BackoffKind;

/// Largest accepted duration flag, in seconds. Far beyond any sane wait,
/// and small enough that the value survives `Duration::from_secs_f64`.
const MAX_FLAG_SECONDS: f64 = 1e9;

#[derive(Parser)]
#[command(name = "gatr")]
#[command(about = "Blocks until an HTTP dependency is healthy, then runs a command.")]
pub struct CommandLine {
    /// Probe target: HOST[:PORT][/PATH]
    #[arg(short, long, default_value_t = ProbeTarget::default())]
    pub target: ProbeTarget,

    /// Base delay between probe attempts, in seconds
    #[arg(short, long, default_value_t = 5.0, value_parser = parse_seconds)]
    pub interval: f64,

    /// Per-attempt HTTP timeout, in seconds
    #[arg(long, default_value_t = 5.0, value_parser = parse_seconds)]
    pub probe_timeout: f64,

    /// Delay policy: fixed, linear or exponential
    #[arg(short, long, default_value = "fixed")]
    pub backoff: BackoffKind,

    /// Upper bound on any single delay, in seconds
    #[arg(long, default_value_t = 300.0, value_parser = parse_seconds)]
    pub max_delay: f64,

    /// Growth factor per attempt for the exponential policy
    #[arg(long, default_value_t = 2.0, value_parser = parse_multiplier)]
    pub multiplier: f64,

    /// Additive jitter factor in 0..=1 (0 disables jitter)
    #[arg(long, default_value_t = 0.0, value_parser = parse_factor)]
    pub jitter: f64,

    /// Give up after this many seconds in total (default: wait forever)
    #[arg(long, value_parser = parse_seconds)]
    pub max_wait: Option<f64>,

    /// Suppress the spinner and informational output
    #[arg(short, long)]
    pub quiet: bool,

    /// Successor command to hand off to once the dependency is ready
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parses a duration flag. Anything `Duration::from_secs_f64` would panic
/// on (negative, NaN, infinite, absurdly large) is a usage error instead.
fn parse_seconds(s: &str) -> Result<f64, String> {
    let secs: f64 = s.parse().map_err(|e| format!("invalid seconds '{s}': {e}"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("seconds must be a non-negative number: '{s}'"));
    }
    if secs > MAX_FLAG_SECONDS {
        return Err(format!("seconds too large: '{s}'"));
    }
    Ok(secs)
}

fn parse_factor(s: &str) -> Result<f64, String> {
    let factor: f64 = s.parse().map_err(|e| format!("invalid factor '{s}': {e}"))?;
    if !factor.is_finite() || factor < 0.0 {
        return Err(format!("factor must be a non-negative number: '{s}'"));
    }
    Ok(factor)
}

/// A multiplier below 1 would shrink delays under the configured interval.
fn parse_multiplier(s: &str) -> Result<f64, String> {
    let multiplier: f64 = s
        .parse()
        .map_err(|e| format!("invalid multiplier '{s}': {e}"))?;
    if !multiplier.is_finite() || multiplier < 1.0 {
        return Err(format!("multiplier must be a finite number >= 1: '{s}'"));
    }
    Ok(multiplier)
}
