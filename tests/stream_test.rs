//! Stream lifecycle tests
//!
//! Drives the subprocess state machine with plain shell commands standing in
//! for `zpool iostat`, so no ZFS tools are required.

#![cfg(unix)]

use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};
use zfs_dashboard::stream::{spawn_command, StreamState};

fn sh(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", script]);
    cmd
}

#[tokio::test]
async fn test_records_flow_and_state_reaches_streaming() {
    // Given: A subprocess emitting one valid counter line then idling
    let (tx, mut rx) = mpsc::channel(8);
    let script = "printf 'tank\\t1\\t2\\t10\\t20\\t30\\t40\\n'; sleep 30";
    let handle = spawn_command(sh(script), Duration::from_secs(1), tx).expect("spawn");
    assert_eq!(handle.state(), StreamState::Connected);

    // When: The first record is parsed
    let update = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("record in time")
        .expect("record");

    // Then: Counters parsed and the state machine advanced to Streaming
    assert_eq!(update.name, "tank");
    assert_eq!(update.read_ops, 10);
    assert_eq!(update.write_ops, 20);
    assert_eq!(handle.state(), StreamState::Streaming);

    assert_eq!(handle.stop().await, StreamState::Stopped);
}

#[tokio::test]
async fn test_stop_terminates_long_running_subprocess() {
    // Given: A subprocess that would run far longer than the test
    let (tx, _rx) = mpsc::channel(8);
    let handle = spawn_command(sh("sleep 300"), Duration::from_secs(1), tx).expect("spawn");

    // When/Then: Stop returns promptly with the Stopped state
    let state = timeout(Duration::from_secs(10), handle.stop())
        .await
        .expect("stop should not hang");
    assert_eq!(state, StreamState::Stopped);
}

#[tokio::test]
async fn test_unexpected_exit_faults_the_stream() {
    // Given: A subprocess that exits immediately
    let (tx, _rx) = mpsc::channel(8);
    let handle = spawn_command(sh("exit 0"), Duration::from_secs(1), tx).expect("spawn");

    // Then: The state machine lands in Faulted, not a crash
    let mut state = handle.watch_state();
    timeout(Duration::from_secs(5), async {
        while *state.borrow_and_update() != StreamState::Faulted {
            state.changed().await.expect("state sender alive or final");
        }
    })
    .await
    .expect("faulted in time");
}

#[tokio::test]
async fn test_garbage_lines_are_skipped_not_fatal() {
    // Given: Noise followed by one valid line
    let (tx, mut rx) = mpsc::channel(8);
    let script = "printf 'garbage\\nshort\\tline\\n'; \
                  printf 'tank\\t1\\t2\\t3\\t4\\t5\\t6\\n'; sleep 30";
    let handle = spawn_command(sh(script), Duration::from_secs(1), tx).expect("spawn");

    // Then: Only the valid line comes through
    let update = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("record in time")
        .expect("record");
    assert_eq!(update.name, "tank");
    assert_eq!(update.write_bytes, 6);

    handle.stop().await;
}

#[tokio::test]
async fn test_spawn_failure_is_a_clean_error() {
    let (tx, _rx) = mpsc::channel(8);
    let result = spawn_command(
        Command::new("/nonexistent/definitely-not-a-binary"),
        Duration::from_secs(1),
        tx,
    );
    assert!(result.is_err());
}
