//! Exit-code propagation through the handoff.

use gatr_common::error::GateError;
use gatr_core::handoff;

fn command(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
#[cfg(unix)]
fn zero_exit_propagates_as_zero() {
    assert_eq!(handoff::run(&command(&["true"])).unwrap(), 0);
}

#[test]
#[cfg(unix)]
fn nonzero_exit_propagates_unchanged() {
    let code = handoff::run(&command(&["sh", "-c", "exit 42"])).unwrap();
    assert_eq!(code, 42);
}

#[test]
#[cfg(unix)]
fn successor_arguments_are_forwarded_verbatim() {
    // The shell only exits 0 if both arguments arrived untouched.
    let code = handoff::run(&command(&[
        "sh",
        "-c",
        r#"[ "$1" = "--flag" ] && [ "$2" = "value with spaces" ]"#,
        "sh",
        "--flag",
        "value with spaces",
    ]))
    .unwrap();
    assert_eq!(code, 0);
}

#[test]
fn unlaunchable_successor_is_a_spawn_error() {
    let err = handoff::run(&command(&["gatr-integration-missing-binary"])).unwrap_err();
    assert!(matches!(err, GateError::Spawn { .. }));
}
