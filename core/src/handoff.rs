//! Successor launch.
//!
//! The gate's job ends by becoming the successor in all observable ways:
//! inherited stdio and a propagated exit code. Spawn-and-wait gives the
//! same contract as a process-image replacement without needing one.

use std::process::{Command, ExitStatus};

use tracing::info;

use gatr_common::error::GateError;

/// Runs the successor command and returns the exit code to terminate with.
///
/// A successor that cannot be spawned is a hard error; a successor that
/// runs and fails is not ours to interpret, its code is passed through.
pub fn run(command: &[String]) -> Result<i32, GateError> {
    let (program, args) = command.split_first().ok_or(GateError::EmptyCommand)?;

    info!("handing off to '{}'", command.join(" "));

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| GateError::Spawn {
            command: program.clone(),
            source,
        })?;

    Ok(exit_code(status))
}

/// Maps a child's termination to the code the gate itself exits with.
///
/// On Unix, death by signal becomes the conventional `128 + signo`.
fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    status.code().unwrap_or(1)
}
