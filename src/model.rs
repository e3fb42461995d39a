//! Entity Model
//!
//! This module contains the normalized hierarchical model built from ZFS
//! command output: pools own vdevs and dataset trees, datasets own snapshots.
//!
//! # Design Notes
//!
//! - **Verbatim sizes**: `zpool list` / `zfs list` emit human-readable sizes
//!   (`10T`, `1.5G`, `-`). Those strings are stored exactly as provided and
//!   never reinterpreted; numeric parsing happens only where the source data
//!   really is numeric (error counters, iostat fields).
//! - **Wholesale replacement**: a full inventory refresh produces a brand new
//!   graph. Instantaneous I/O counters on pools and vdevs are re-stamped by
//!   the telemetry engine after each rebuild; rolling history never lives on
//!   the entities themselves.
//! - **Flat vdev lists**: `zpool status` only reliably exposes one level of
//!   nesting, so vdevs are kept as an ordered flat list per pool with a
//!   [`VdevKind`] tag rather than a parent pointer.

use serde::Serialize;
use std::fmt;

/// Health of a pool as reported in the `zpool list` health column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PoolHealth {
    Online,
    Degraded,
    Faulted,
    Offline,
    Unavail,
    Removed,
    /// Anything this crate does not recognize, including future ZFS states.
    Unknown,
}

impl PoolHealth {
    pub fn from_str(s: &str) -> Self {
        match s {
            "ONLINE" => PoolHealth::Online,
            "DEGRADED" => PoolHealth::Degraded,
            "FAULTED" => PoolHealth::Faulted,
            "OFFLINE" => PoolHealth::Offline,
            "UNAVAIL" => PoolHealth::Unavail,
            "REMOVED" => PoolHealth::Removed,
            _ => PoolHealth::Unknown,
        }
    }
}

impl fmt::Display for PoolHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PoolHealth::Online => "ONLINE",
            PoolHealth::Degraded => "DEGRADED",
            PoolHealth::Faulted => "FAULTED",
            PoolHealth::Offline => "OFFLINE",
            PoolHealth::Unavail => "UNAVAIL",
            PoolHealth::Removed => "REMOVED",
            PoolHealth::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Category of an entry in the `zpool status` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VdevKind {
    /// The pool's own line in the config section. Never emitted as a
    /// displayable vdev.
    Root,
    Mirror,
    Raidz,
    Disk,
}

/// A virtual device: leaf disk or redundancy group within a pool.
///
/// Names are only unique within the owning pool.
#[derive(Debug, Clone, Serialize)]
pub struct Vdev {
    pub name: String,
    pub state: String,
    pub kind: VdevKind,
    /// Cumulative error counters from `zpool status`. Monotonic within a
    /// session.
    pub read_errors: u64,
    pub write_errors: u64,
    pub checksum_errors: u64,
    /// Instantaneous per-interval I/O, merged in from the iostat stream.
    pub read_ops: u64,
    pub write_ops: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
}

impl Vdev {
    pub fn new(name: String, state: String, kind: VdevKind) -> Self {
        Self {
            name,
            state,
            kind,
            read_errors: 0,
            write_errors: 0,
            checksum_errors: 0,
            read_ops: 0,
            write_ops: 0,
            read_bytes: 0,
            write_bytes: 0,
        }
    }
}

/// Point-in-time snapshot of a dataset. Immutable once parsed.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Portion after the `@` in `pool/path@name`.
    pub name: String,
    pub used: String,
}

/// A filesystem or volume. Names are `/`-separated paths; children are
/// exclusively owned by their parent.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub name: String,
    pub used: String,
    pub avail: String,
    pub refer: String,
    pub mountpoint: String,
    pub compression: String,
    pub children: Vec<Dataset>,
    pub snapshots: Vec<Snapshot>,
}

impl Dataset {
    pub fn new(
        name: String,
        used: String,
        avail: String,
        refer: String,
        mountpoint: String,
        compression: String,
    ) -> Self {
        Self {
            name,
            used,
            avail,
            refer,
            mountpoint,
            compression,
            children: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    /// Name of the parent dataset, if the name has one (`tank/a/b` -> `tank/a`).
    pub fn parent_name(&self) -> Option<&str> {
        self.name.rsplit_once('/').map(|(parent, _)| parent)
    }
}

/// Top-level storage aggregate. The name is the join key between the
/// `zpool list`, `zpool status`, `zfs list` and iostat views.
#[derive(Debug, Clone, Serialize)]
pub struct Pool {
    pub name: String,
    pub size: String,
    pub alloc: String,
    pub free: String,
    pub frag: String,
    pub cap: String,
    pub health: PoolHealth,
    /// Verbatim health column; `zpool status` can refine this later.
    pub state: String,
    pub altroot: String,
    pub read_ops: u64,
    pub write_ops: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub vdevs: Vec<Vdev>,
    /// Root datasets of this pool's tree.
    pub datasets: Vec<Dataset>,
}

impl Pool {
    /// Recompute the capacity column when size and alloc are plain integers
    /// (`zpool list -p` output). Human-readable values are left untouched.
    pub fn validate_capacity(&mut self) {
        if let (Ok(size), Ok(alloc)) = (self.size.parse::<u128>(), self.alloc.parse::<u128>()) {
            if size > 0 {
                self.cap = format!("{}%", alloc * 100 / size);
            }
        }
    }
}

/// One record from the streaming counter feed.
///
/// The subject name alone is ambiguous across pools; `indent` carries the
/// leading-whitespace width of the original line so the merge engine can
/// track which pool an indented vdev row belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterUpdate {
    pub indent: usize,
    pub name: String,
    pub read_ops: u64,
    pub write_ops: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// The full entity graph handed to display collaborators. Rebuilt wholesale
/// on every inventory refresh.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntityGraph {
    pub pools: Vec<Pool>,
}

impl EntityGraph {
    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.iter().find(|p| p.name == name)
    }

    pub fn pool_mut(&mut self, name: &str) -> Option<&mut Pool> {
        self.pools.iter_mut().find(|p| p.name == name)
    }

    pub fn vdev_mut(&mut self, pool: &str, vdev: &str) -> Option<&mut Vdev> {
        self.pool_mut(pool)?.vdevs.iter_mut().find(|v| v.name == vdev)
    }
}
