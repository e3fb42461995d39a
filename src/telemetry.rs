//! Telemetry Merge Engine
//!
//! Consumes [`CounterUpdate`] records parsed from the iostat stream and
//! merges them into the live entity graph. The engine owns everything that
//! must outlive a full inventory rebuild: per-subject rolling history and
//! the last sample seen for each subject.
//!
//! # Subject Resolution
//!
//! The stream never re-asserts which pool a vdev belongs to. A zero-indent
//! row names a pool and becomes the current context; an indented row is a
//! vdev of that pool. The tie-break order is deliberate and load-bearing:
//! indent width first, then name. A vdev named like a pool in another pool
//! must still resolve through its indent context.
//!
//! # Late Subjects
//!
//! A record naming a subject the current graph does not know (inventory
//! refresh lagging the stream) is parked in a side table instead of being
//! dropped, and replayed the next time the graph is rebuilt.

use crate::model::{CounterUpdate, EntityGraph};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Rolling-history window per subject, in samples (one per stream interval).
pub const HISTORY_WINDOW: usize = 60;

/// Identity of a counter subject, stable across graph rebuilds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectKey {
    pub pool: String,
    /// `None` for the pool-level row itself.
    pub vdev: Option<String>,
}

/// Last instantaneous sample for one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sample {
    pub read_ops: u64,
    pub write_ops: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Bounded ops history backing the sparkline views.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub read_ops: VecDeque<u64>,
    pub write_ops: VecDeque<u64>,
}

impl History {
    fn push(&mut self, read_ops: u64, write_ops: u64) {
        if self.read_ops.len() == HISTORY_WINDOW {
            self.read_ops.pop_front();
            self.write_ops.pop_front();
        }
        self.read_ops.push_back(read_ops);
        self.write_ops.push_back(write_ops);
    }
}

#[derive(Debug, Default)]
pub struct TelemetryEngine {
    /// Pool context established by the last zero-indent stream row.
    current_pool: Option<String>,
    /// Last sample per subject; survives rebuilds so fresh graphs can be
    /// re-stamped instead of flashing back to zero.
    last_seen: HashMap<SubjectKey, Sample>,
    history: HashMap<SubjectKey, History>,
    /// Samples for subjects the current graph does not know yet.
    pending: HashMap<SubjectKey, Sample>,
}

impl TelemetryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a stream record to a subject key, updating the pool context
    /// for zero-indent rows. Returns `None` for an indented row that arrives
    /// before any pool context exists (mid-stream attach).
    fn resolve(&mut self, update: &CounterUpdate) -> Option<SubjectKey> {
        if update.indent == 0 {
            self.current_pool = Some(update.name.clone());
            Some(SubjectKey {
                pool: update.name.clone(),
                vdev: None,
            })
        } else {
            self.current_pool.as_ref().map(|pool| SubjectKey {
                pool: pool.clone(),
                vdev: Some(update.name.clone()),
            })
        }
    }

    /// Merges one stream record into the graph: overwrite the subject's
    /// instantaneous counters, append to its rolling history. Unknown
    /// subjects are parked for the next rebuild.
    pub fn apply(&mut self, graph: &mut EntityGraph, update: CounterUpdate) {
        let Some(key) = self.resolve(&update) else {
            debug!(name = %update.name, "dropping indented record with no pool context");
            return;
        };
        let sample = Sample {
            read_ops: update.read_ops,
            write_ops: update.write_ops,
            read_bytes: update.read_bytes,
            write_bytes: update.write_bytes,
        };

        self.history
            .entry(key.clone())
            .or_default()
            .push(sample.read_ops, sample.write_ops);
        self.last_seen.insert(key.clone(), sample);

        if !stamp(graph, &key, sample) {
            debug!(pool = %key.pool, vdev = ?key.vdev, "subject not in graph, parking sample");
            self.pending.insert(key, sample);
        }
    }

    /// Re-stamps last-known counters onto a freshly rebuilt graph and
    /// replays any parked samples that now resolve.
    pub fn absorb_rebuild(&mut self, graph: &mut EntityGraph) {
        self.pending.retain(|key, sample| !stamp(graph, key, *sample));
        for (key, sample) in &self.last_seen {
            stamp(graph, key, *sample);
        }
    }

    pub fn history(&self, key: &SubjectKey) -> Option<&History> {
        self.history.get(key)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Writes a sample onto its subject in the graph. Returns false when the
/// subject does not exist there.
fn stamp(graph: &mut EntityGraph, key: &SubjectKey, sample: Sample) -> bool {
    match &key.vdev {
        None => {
            let Some(pool) = graph.pool_mut(&key.pool) else {
                return false;
            };
            pool.read_ops = sample.read_ops;
            pool.write_ops = sample.write_ops;
            pool.read_bytes = sample.read_bytes;
            pool.write_bytes = sample.write_bytes;
            true
        }
        Some(vdev) => {
            let Some(vdev) = graph.vdev_mut(&key.pool, vdev) else {
                return false;
            };
            vdev.read_ops = sample.read_ops;
            vdev.write_ops = sample.write_ops;
            vdev.read_bytes = sample.read_bytes;
            vdev.write_bytes = sample.write_bytes;
            true
        }
    }
}
