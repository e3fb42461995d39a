//! Parsers for the tab-separated inventory listings.
//!
//! All three listings come from scripted (`-H`) mode: one record per line,
//! fields separated by single tabs, no header. Rows with fewer fields than
//! the record shape requires are skipped so a truncated listing still
//! produces every complete record it contains.

use crate::model::{Dataset, Pool, PoolHealth, Snapshot};
use crate::parse::rows::rows;
use std::collections::HashMap;
use tracing::debug;

/// Parses `zpool list -H -o name,size,alloc,free,frag,cap,health,altroot`.
///
/// Eight fields per row. The health column doubles as the initial pool
/// state; `zpool status` refines it later in the refresh.
pub fn parse_pool_list(output: &str) -> Vec<Pool> {
    let mut pools = Vec::new();
    for row in rows(output) {
        let fields = row.tab_fields();
        if fields.len() < 8 {
            debug!(fields = fields.len(), "skipping short pool row");
            continue;
        }
        let mut pool = Pool {
            name: fields[0].to_string(),
            size: fields[1].to_string(),
            alloc: fields[2].to_string(),
            free: fields[3].to_string(),
            frag: fields[4].to_string(),
            cap: fields[5].to_string(),
            health: PoolHealth::from_str(fields[6]),
            state: fields[6].to_string(),
            altroot: fields[7].to_string(),
            read_ops: 0,
            write_ops: 0,
            read_bytes: 0,
            write_bytes: 0,
            vdevs: Vec::new(),
            datasets: Vec::new(),
        };
        pool.validate_capacity();
        pools.push(pool);
    }
    pools
}

/// Parses `zfs list -H -o name,used,avail,refer,mountpoint,compression,type`.
///
/// Only `filesystem` and `volume` rows are retained; snapshots and bookmarks
/// occasionally show up in generic listings and are dropped here, not
/// treated as errors.
pub fn parse_dataset_list(output: &str) -> Vec<Dataset> {
    let mut datasets = Vec::new();
    for row in rows(output) {
        let fields = row.tab_fields();
        if fields.len() < 7 {
            debug!(fields = fields.len(), "skipping short dataset row");
            continue;
        }
        match fields[6] {
            "filesystem" | "volume" => datasets.push(Dataset::new(
                fields[0].to_string(),
                fields[1].to_string(),
                fields[2].to_string(),
                fields[3].to_string(),
                fields[4].to_string(),
                fields[5].to_string(),
            )),
            _ => {}
        }
    }
    datasets
}

/// Parses `zfs list -H -t snapshot -o name,used` into a map from dataset
/// name to its snapshots, preserving input order per dataset. Rows whose
/// name carries no `@` are skipped.
pub fn parse_snapshot_list(output: &str) -> HashMap<String, Vec<Snapshot>> {
    let mut by_dataset: HashMap<String, Vec<Snapshot>> = HashMap::new();
    for row in rows(output) {
        let fields = row.tab_fields();
        if fields.len() < 2 {
            continue;
        }
        if let Some((dataset, snap)) = fields[0].split_once('@') {
            by_dataset
                .entry(dataset.to_string())
                .or_default()
                .push(Snapshot {
                    name: snap.to_string(),
                    used: fields[1].to_string(),
                });
        }
    }
    by_dataset
}
