//! ZFS Command Output Parsers
//!
//! This module converts the semi-structured text emitted by `zpool` / `zfs`
//! into the entity model. Every parser follows the same recovery rule: a
//! malformed row is skipped, an empty input yields an empty result, and
//! nothing here ever returns an error or panics. Partial tool output must
//! never take down a refresh.
//!
//! # Sources Covered
//!
//! - `zpool list -H -o name,size,alloc,free,frag,cap,health,altroot` →
//!   [`inventory::parse_pool_list`]
//! - `zfs list -H -o name,used,avail,refer,mountpoint,compression,type` →
//!   [`inventory::parse_dataset_list`]
//! - `zfs list -H -t snapshot -o name,used` →
//!   [`inventory::parse_snapshot_list`]
//! - `zpool status` → [`status::parse_status`]
//! - `zpool iostat -v -H -p -y <n>` (one line at a time) →
//!   [`iostat::parse_counter_line`]

pub mod inventory;
pub mod iostat;
pub mod rows;
pub mod status;
