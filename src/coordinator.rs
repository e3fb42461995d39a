//! Coordinator: the single writer of the entity graph.
//!
//! Both mutation sources — the periodic inventory rebuild and the counter
//! stream — funnel through one task. Display collaborators never see the
//! graph mid-mutation: after every mutation batch the coordinator publishes
//! an immutable, already-filtered snapshot behind an `Arc` through a watch
//! channel, and readers hold whichever snapshot they last observed.
//!
//! At most one refresh and one stream task are active at a time; the stream
//! hands records over through a bounded channel and never mutates anything
//! directly.

use crate::config::Config;
use crate::filter::FilterSet;
use crate::hierarchy::{self, RawInventory};
use crate::model::{CounterUpdate, EntityGraph};
use crate::source::InventorySource;
use crate::telemetry::TelemetryEngine;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Control messages accepted by the coordinator.
pub enum Command {
    /// Rebuild the graph from a fresh inventory fetch now.
    Refresh,
    /// Replace the active filter set for subsequent snapshots.
    SetFilters(FilterSet),
    Shutdown,
}

/// Cloneable client side of the coordinator.
#[derive(Clone)]
pub struct Handle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Arc<EntityGraph>>,
}

impl Handle {
    pub async fn refresh(&self) {
        let _ = self.commands.send(Command::Refresh).await;
    }

    pub async fn set_filters(&self, filters: FilterSet) {
        let _ = self.commands.send(Command::SetFilters(filters)).await;
    }

    pub async fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown).await;
    }

    /// Current filtered snapshot. Non-mutating; never blocks on the writer.
    pub fn current_view(&self) -> Arc<EntityGraph> {
        self.snapshots.borrow().clone()
    }

    /// Watch side, for collaborators that want change notifications.
    pub fn subscribe(&self) -> watch::Receiver<Arc<EntityGraph>> {
        self.snapshots.clone()
    }
}

pub struct Coordinator<S: InventorySource> {
    source: S,
    engine: TelemetryEngine,
    filters: FilterSet,
    graph: EntityGraph,
    refresh_interval: Duration,
}

impl<S: InventorySource + 'static> Coordinator<S> {
    pub fn new(config: &Config, source: S) -> Self {
        let filters = FilterSet::new(
            config.filter.pool.clone(),
            None,
            config.filter.dataset_pattern.as_deref(),
        );
        Self {
            source,
            engine: TelemetryEngine::new(),
            filters,
            graph: EntityGraph::default(),
            refresh_interval: Duration::from_secs(config.refresh.interval_seconds),
        }
    }

    /// Starts the actor. `records` is the stream task's output channel.
    pub fn spawn(
        mut self,
        mut records: mpsc::Receiver<CounterUpdate>,
    ) -> (Handle, tokio::task::JoinHandle<()>) {
        let (command_tx, mut command_rx) = mpsc::channel(16);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(EntityGraph::default()));

        let task = tokio::spawn(async move {
            // First tick lands one full interval out; callers request the
            // initial refresh explicitly.
            let mut ticker = interval_at(
                Instant::now() + self.refresh_interval,
                self.refresh_interval,
            );
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.rebuild().await;
                        self.publish(&snapshot_tx);
                    }
                    Some(update) = records.recv() => {
                        self.engine.apply(&mut self.graph, update);
                        // Drain whatever else the interval delivered so one
                        // snapshot covers the whole batch.
                        while let Ok(update) = records.try_recv() {
                            self.engine.apply(&mut self.graph, update);
                        }
                        self.publish(&snapshot_tx);
                    }
                    command = command_rx.recv() => match command {
                        Some(Command::Refresh) => {
                            self.rebuild().await;
                            self.publish(&snapshot_tx);
                        }
                        Some(Command::SetFilters(filters)) => {
                            self.filters = filters;
                            self.publish(&snapshot_tx);
                        }
                        Some(Command::Shutdown) | None => {
                            info!("coordinator shutting down");
                            return;
                        }
                    }
                }
            }
        });

        (
            Handle {
                commands: command_tx,
                snapshots: snapshot_rx,
            },
            task,
        )
    }

    async fn rebuild(&mut self) {
        let raw: RawInventory = self.source.fetch().await;
        self.graph = hierarchy::refresh(&raw);
        // Carry last-known counters and parked samples onto the new graph.
        self.engine.absorb_rebuild(&mut self.graph);
        debug!(pools = self.graph.pools.len(), "graph rebuilt");
    }

    fn publish(&self, tx: &watch::Sender<Arc<EntityGraph>>) {
        let view = if self.filters.is_empty() {
            self.graph.clone()
        } else {
            self.filters.apply(&self.graph)
        };
        let _ = tx.send(Arc::new(view));
    }
}
