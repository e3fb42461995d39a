//! Inventory sources: where the raw command text comes from.
//!
//! The coordinator only cares about getting four text blocks per refresh.
//! [`ZfsCommands`] runs the real tools; tests substitute a canned source.

use crate::hierarchy::RawInventory;
use tokio::process::Command;
use tracing::{debug, warn};

/// Produces one [`RawInventory`] per refresh request.
pub trait InventorySource: Send + Sync {
    fn fetch(&self) -> impl std::future::Future<Output = RawInventory> + Send;
}

/// Invokes the `zpool` / `zfs` CLI tools. A missing tool or failed command
/// yields an empty block for that source; the refresh still proceeds with
/// whatever the other commands returned.
#[derive(Debug, Clone, Default)]
pub struct ZfsCommands;

impl ZfsCommands {
    async fn run(&self, program: &str, args: &[&str]) -> String {
        match Command::new(program).args(args).output().await {
            Ok(out) if out.status.success() => {
                String::from_utf8_lossy(&out.stdout).into_owned()
            }
            Ok(out) => {
                warn!(
                    program,
                    status = %out.status,
                    stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                    "command failed, treating output as empty"
                );
                String::new()
            }
            Err(e) => {
                debug!(program, error = %e, "command unavailable");
                String::new()
            }
        }
    }
}

impl InventorySource for ZfsCommands {
    async fn fetch(&self) -> RawInventory {
        RawInventory {
            pool_list: self
                .run(
                    "zpool",
                    &["list", "-H", "-o", "name,size,alloc,free,frag,cap,health,altroot"],
                )
                .await,
            pool_status: self.run("zpool", &["status"]).await,
            dataset_list: self
                .run(
                    "zfs",
                    &[
                        "list",
                        "-H",
                        "-o",
                        "name,used,avail,refer,mountpoint,compression,type",
                    ],
                )
                .await,
            snapshot_list: self
                .run("zfs", &["list", "-H", "-t", "snapshot", "-o", "name,used"])
                .await,
        }
    }
}
