//! Counter stream: the long-lived `zpool iostat` subprocess.
//!
//! One task owns the subprocess's stdout pipe, parses one record per line
//! and forwards parsed records to the coordinator through a bounded channel.
//! The task never touches the entity graph itself.
//!
//! # Lifecycle
//!
//! `Disconnected → Connected → Streaming → {Stopped | Faulted}`
//!
//! - `Connected` once the subprocess spawns.
//! - `Streaming` on the first successfully parsed record.
//! - `Faulted` on unexpected exit or a pipe read error; logged, never a
//!   crash. The last counters the coordinator applied stay frozen.
//! - `Stopped` on explicit shutdown: the subprocess is signalled, waited on
//!   for a grace period and force-killed if it lingers.

use crate::config::StreamConfig;
use crate::error::{DashboardError, Result};
use crate::model::CounterUpdate;
use crate::parse::iostat::parse_counter_line;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Disconnected,
    Connected,
    Streaming,
    Stopped,
    Faulted,
}

/// Handle held by the caller; dropping it does not stop the stream, calling
/// [`StreamHandle::stop`] does.
pub struct StreamHandle {
    shutdown: Option<oneshot::Sender<()>>,
    state: watch::Receiver<StreamState>,
    task: tokio::task::JoinHandle<()>,
}

impl StreamHandle {
    pub fn state(&self) -> StreamState {
        *self.state.borrow()
    }

    /// Watch side of the state machine, for observers.
    pub fn watch_state(&self) -> watch::Receiver<StreamState> {
        self.state.clone()
    }

    /// Requests shutdown, waits for the task (and the subprocess under it)
    /// to finish and returns the final state.
    pub async fn stop(mut self) -> StreamState {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.task).await;
        *self.state.borrow()
    }
}

/// Spawns the iostat subprocess and the reader task. Parsed records flow
/// through `records`; the returned handle exposes state and shutdown.
pub fn spawn(
    config: &StreamConfig,
    records: mpsc::Sender<CounterUpdate>,
) -> Result<StreamHandle> {
    let interval = config.interval_seconds.to_string();
    let mut command = Command::new("zpool");
    command.args(["iostat", "-v", "-H", "-p", "-y", &interval]);
    spawn_command(
        command,
        Duration::from_secs(config.stop_grace_seconds),
        records,
    )
}

/// Like [`spawn`] but for an arbitrary line-oriented subprocess. The
/// production path always goes through [`spawn`]; this seam exists so the
/// stream lifecycle can be driven without ZFS installed.
pub fn spawn_command(
    mut command: Command,
    grace: Duration,
    records: mpsc::Sender<CounterUpdate>,
) -> Result<StreamHandle> {
    let program = command.as_std().get_program().to_string_lossy().into_owned();
    let mut child = command
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| DashboardError::Spawn {
            command: program,
            source,
        })?;

    let stdout = child.stdout.take().ok_or_else(|| {
        DashboardError::Stream("iostat subprocess has no stdout pipe".to_string())
    })?;

    // Disconnected exists only between handle construction and the spawn
    // above; by the time the caller sees the handle the stream is connected.
    let (state_tx, state_rx) = watch::channel(StreamState::Disconnected);
    let _ = state_tx.send(StreamState::Connected);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    info!("counter stream connected");
    let task = tokio::spawn(run(child, stdout, records, state_tx, shutdown_rx, grace));

    Ok(StreamHandle {
        shutdown: Some(shutdown_tx),
        state: state_rx,
        task,
    })
}

async fn run(
    mut child: Child,
    stdout: tokio::process::ChildStdout,
    records: mpsc::Sender<CounterUpdate>,
    state: watch::Sender<StreamState>,
    mut shutdown: oneshot::Receiver<()>,
    grace: Duration,
) {
    let mut lines = BufReader::new(stdout).lines();

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                // A partial line at cancellation time is discarded.
                stop_child(&mut child, grace).await;
                let _ = state.send(StreamState::Stopped);
                info!("counter stream stopped");
                return;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let Some(update) = parse_counter_line(&line) else {
                        continue;
                    };
                    if *state.borrow() != StreamState::Streaming {
                        let _ = state.send(StreamState::Streaming);
                    }
                    // The coordinator going away means shutdown is in
                    // progress; treat it like a stop request.
                    if records.send(update).await.is_err() {
                        debug!("record channel closed, stopping stream");
                        stop_child(&mut child, grace).await;
                        let _ = state.send(StreamState::Stopped);
                        return;
                    }
                }
                Ok(None) => {
                    warn!("iostat exited unexpectedly, freezing last counters");
                    let _ = child.wait().await;
                    let _ = state.send(StreamState::Faulted);
                    return;
                }
                Err(e) => {
                    warn!(error = %e, "iostat pipe read failed, freezing last counters");
                    stop_child(&mut child, grace).await;
                    let _ = state.send(StreamState::Faulted);
                    return;
                }
            }
        }
    }
}

/// Terminates the subprocess: signal, bounded wait, force-kill after the
/// grace period.
async fn stop_child(child: &mut Child, grace: Duration) {
    if child.start_kill().is_err() {
        // Already exited.
        let _ = child.try_wait();
        return;
    }
    if timeout(grace, child.wait()).await.is_err() {
        warn!("iostat ignored termination, force-killing");
        let _ = child.kill().await;
    }
}
