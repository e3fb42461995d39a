//! Hierarchy assembly: flat parser output into the owned entity graph.
//!
//! `zfs list` returns datasets as a flat, name-sorted list. Tree structure
//! is implicit in the names: `tank/data/media` is a child of `tank/data`.
//! Because children sort directly after their parent, a single forward pass
//! with a name lookup is enough; no recursion is needed for attachment.

use crate::model::{Dataset, EntityGraph, Snapshot};
use crate::parse::{inventory, status};
use std::collections::HashMap;
use tracing::debug;

/// Raw text blocks of one full inventory refresh, in the order the
/// collaborator fetched them.
#[derive(Debug, Clone, Default)]
pub struct RawInventory {
    pub pool_list: String,
    pub pool_status: String,
    pub dataset_list: String,
    pub snapshot_list: String,
}

/// Links a flat, name-sorted dataset list into trees and returns the roots.
///
/// A dataset whose parent is absent from the input (truncated listing) is
/// kept as a root rather than dropped; data is never silently lost.
pub fn build_dataset_tree(datasets: Vec<Dataset>) -> Vec<Dataset> {
    // Arena of entities plus child-index lists, so parents do not need to
    // own children until the final assembly pass.
    let index_by_name: HashMap<String, usize> = datasets
        .iter()
        .enumerate()
        .map(|(i, ds)| (ds.name.clone(), i))
        .collect();

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); datasets.len()];
    let mut root_indexes = Vec::new();

    for (i, ds) in datasets.iter().enumerate() {
        match ds.parent_name().and_then(|p| index_by_name.get(p)) {
            Some(&parent) => children_of[parent].push(i),
            None => root_indexes.push(i),
        }
    }

    // Children sort after their parent, so filling slots back-to-front means
    // every child is fully assembled before its parent takes it.
    let mut slots: Vec<Option<Dataset>> = datasets.into_iter().map(Some).collect();
    for i in (0..slots.len()).rev() {
        let kids: Vec<Dataset> = children_of[i]
            .iter()
            .filter_map(|&c| slots[c].take())
            .collect();
        if let Some(ds) = slots[i].as_mut() {
            ds.children = kids;
        }
    }

    root_indexes
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

fn attach_snapshots(datasets: &mut [Dataset], snapshots: &mut HashMap<String, Vec<Snapshot>>) {
    for ds in datasets {
        if let Some(snaps) = snapshots.remove(&ds.name) {
            ds.snapshots = snaps;
        }
    }
}

/// Rebuilds the entire entity graph from raw command output.
///
/// Pure and deterministic: identical input text always yields an identical
/// graph. Instantaneous I/O counters start at zero; the telemetry engine
/// re-stamps them after the rebuild.
pub fn refresh(raw: &RawInventory) -> EntityGraph {
    let mut pools = inventory::parse_pool_list(&raw.pool_list);
    let mut vdevs_by_pool = status::parse_status(&raw.pool_status);
    let mut datasets = inventory::parse_dataset_list(&raw.dataset_list);
    let mut snapshots = inventory::parse_snapshot_list(&raw.snapshot_list);

    attach_snapshots(&mut datasets, &mut snapshots);
    let mut roots = build_dataset_tree(datasets);

    for pool in &mut pools {
        if let Some(vdevs) = vdevs_by_pool.remove(&pool.name) {
            pool.vdevs = vdevs;
        }
        // The pool's root dataset shares the pool's name.
        let mut i = 0;
        while i < roots.len() {
            if roots[i].name == pool.name {
                pool.datasets.push(roots.remove(i));
            } else {
                i += 1;
            }
        }
    }

    debug!(
        pools = pools.len(),
        orphan_roots = roots.len(),
        "inventory refresh assembled"
    );
    EntityGraph { pools }
}
