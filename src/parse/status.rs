//! Parser for the `zpool status` device report.
//!
//! Unlike the scripted listings, `zpool status` is written for humans:
//! labeled sections (`pool:`, `state:`, `config:`, `errors:`) with a
//! column-aligned device table inside `config:` whose indentation encodes
//! the device tree. The format does not reliably expose more than one
//! nesting level, so the result is a flat, ordered device list per pool
//! with a [`VdevKind`] tag instead of parent pointers.

use crate::model::{Vdev, VdevKind};
use crate::parse::rows::{rows_with_blanks, Row};
use std::collections::HashMap;
use tracing::debug;

/// Per-invocation parser state. `current_pool` and `in_config` are the only
/// context the format carries between lines; a `pool:` marker resets both.
struct StatusParser {
    current_pool: Option<String>,
    in_config: bool,
    vdevs_by_pool: HashMap<String, Vec<Vdev>>,
}

impl StatusParser {
    fn new() -> Self {
        Self {
            current_pool: None,
            in_config: false,
            vdevs_by_pool: HashMap::new(),
        }
    }

    fn feed(&mut self, row: Row<'_>) {
        let stripped = row.trimmed();
        if let Some(rest) = stripped.strip_prefix("pool:") {
            let name = rest.trim().to_string();
            self.vdevs_by_pool.insert(name.clone(), Vec::new());
            self.current_pool = Some(name);
            self.in_config = false;
            return;
        }

        if stripped.starts_with("config:") {
            self.in_config = true;
            return;
        }

        let Some(pool) = self.current_pool.clone() else {
            return;
        };
        if !self.in_config {
            return;
        }

        // Column header, trailing error summary, blank separators.
        if stripped.starts_with("NAME") || stripped.starts_with("errors:") || stripped.is_empty() {
            return;
        }

        let tokens = row.tokens();
        if tokens.len() < 5 {
            debug!(pool = %pool, line = stripped, "skipping short config row");
            return;
        }

        let name = tokens[0];
        let state = tokens[1];
        // Some rows carry diagnostic text instead of counts; default to zero
        // rather than aborting the parse.
        let read_errors = tokens[2].parse().unwrap_or(0);
        let write_errors = tokens[3].parse().unwrap_or(0);
        let checksum_errors = tokens[4].parse().unwrap_or(0);

        let kind = if name == pool {
            VdevKind::Root
        } else if name.starts_with("mirror") {
            VdevKind::Mirror
        } else if name.starts_with("raidz") {
            VdevKind::Raidz
        } else {
            VdevKind::Disk
        };

        // The pool's own config line is the root container, not a device.
        if kind == VdevKind::Root {
            return;
        }

        let mut vdev = Vdev::new(name.to_string(), state.to_string(), kind);
        vdev.read_errors = read_errors;
        vdev.write_errors = write_errors;
        vdev.checksum_errors = checksum_errors;
        if let Some(list) = self.vdevs_by_pool.get_mut(&pool) {
            list.push(vdev);
        }
    }
}

/// Parses a full `zpool status` report into a map from pool name to its
/// ordered vdev list. A pool section with no `config:` block yields an
/// empty list, not an error.
pub fn parse_status(output: &str) -> HashMap<String, Vec<Vdev>> {
    let mut parser = StatusParser::new();
    for row in rows_with_blanks(output) {
        parser.feed(row);
    }
    parser.vdevs_by_pool
}
