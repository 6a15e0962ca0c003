use std::time::Duration;

use thiserror::Error;

/// Failures that end the gate itself.
///
/// Probe failures are deliberately absent: they are retried, never surfaced.
#[derive(Debug, Error)]
pub enum GateError {
    /// The dependency never became healthy within the configured bound.
    #[error("dependency still unavailable after {waited:?} (max wait: {limit:?})")]
    ProbeTimeout { waited: Duration, limit: Duration },

    /// The successor command could not be launched at all.
    #[error("failed to launch successor command '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// No successor command was given.
    #[error("no successor command to hand off to")]
    EmptyCommand,
}
