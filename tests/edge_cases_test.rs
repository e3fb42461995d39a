//! Edge case tests
//!
//! Unusual but valid command output shapes, plus the model helpers.

use zfs_dashboard::model::{Dataset, PoolHealth};
use zfs_dashboard::parse::{inventory, status};
use zfs_dashboard::units::humanize_bytes;

#[test]
fn test_health_parses_all_known_states() {
    assert_eq!(PoolHealth::from_str("ONLINE"), PoolHealth::Online);
    assert_eq!(PoolHealth::from_str("DEGRADED"), PoolHealth::Degraded);
    assert_eq!(PoolHealth::from_str("FAULTED"), PoolHealth::Faulted);
    assert_eq!(PoolHealth::from_str("OFFLINE"), PoolHealth::Offline);
    assert_eq!(PoolHealth::from_str("UNAVAIL"), PoolHealth::Unavail);
    assert_eq!(PoolHealth::from_str("REMOVED"), PoolHealth::Removed);
}

#[test]
fn test_health_unrecognized_becomes_unknown() {
    // Future ZFS states must not break parsing
    assert_eq!(PoolHealth::from_str("SPLIT"), PoolHealth::Unknown);
    assert_eq!(PoolHealth::from_str("online"), PoolHealth::Unknown);
    assert_eq!(PoolHealth::from_str(""), PoolHealth::Unknown);
}

#[test]
fn test_health_displays_zfs_uppercase_form() {
    assert_eq!(PoolHealth::Online.to_string(), "ONLINE");
    assert_eq!(PoolHealth::Unknown.to_string(), "UNKNOWN");
}

#[test]
fn test_pool_name_with_dots_and_dashes() {
    let output = "my-pool.v2\t10T\t5T\t5T\t10%\t50%\tONLINE\t-";
    let pools = inventory::parse_pool_list(output);
    assert_eq!(pools[0].name, "my-pool.v2");
}

#[test]
fn test_dataset_parent_name_helper() {
    let ds = Dataset::new(
        "tank/data/media".into(),
        "1G".into(),
        "9G".into(),
        "1G".into(),
        "/tank/data/media".into(),
        "lz4".into(),
    );
    assert_eq!(ds.parent_name(), Some("tank/data"));

    let root = Dataset::new(
        "tank".into(),
        "1G".into(),
        "9G".into(),
        "1G".into(),
        "/tank".into(),
        "off".into(),
    );
    assert_eq!(root.parent_name(), None);
}

#[test]
fn test_status_disk_named_like_another_pool_is_still_disk() {
    // A disk whose name happens to equal a different pool's name only counts
    // as root within its own pool section
    let output = "  pool: tank\nconfig:\n\
                  \tNAME    STATE  READ WRITE CKSUM\n\
                  \ttank    ONLINE    0     0     0\n\
                  \t  backup ONLINE   0     0     0\n";
    let vdevs = &status::parse_status(output)["tank"];
    assert_eq!(vdevs.len(), 1);
    assert_eq!(vdevs[0].name, "backup");
}

#[test]
fn test_status_mirror_prefix_variants() {
    let output = "  pool: tank\nconfig:\n\
                  \tNAME        STATE  READ WRITE CKSUM\n\
                  \ttank        ONLINE    0     0     0\n\
                  \t  mirror-12 ONLINE    0     0     0\n\
                  \t  raidz3-1  ONLINE    0     0     0\n";
    let vdevs = &status::parse_status(output)["tank"];
    assert_eq!(vdevs[0].kind, zfs_dashboard::model::VdevKind::Mirror);
    assert_eq!(vdevs[1].kind, zfs_dashboard::model::VdevKind::Raidz);
}

#[test]
fn test_snapshot_name_containing_second_at() {
    // Split on the first @ only
    let output = "tank/data@weird@name\t1G";
    let snaps = inventory::parse_snapshot_list(output);
    assert_eq!(snaps["tank/data"][0].name, "weird@name");
}

#[test]
fn test_humanize_bytes_scales() {
    assert_eq!(humanize_bytes(0.0), "0B");
    assert_eq!(humanize_bytes(512.0), "512.0B");
    assert_eq!(humanize_bytes(1024.0), "1.0K");
    assert_eq!(humanize_bytes(1536.0), "1.5K");
    assert_eq!(humanize_bytes(1024.0 * 1024.0 * 1024.0), "1.0G");
}
