//! Property-based tests using proptest
//!
//! The parsers must hold their recovery guarantees for arbitrary input:
//! never panic, never error, skip what they cannot read.

use proptest::prelude::*;
use zfs_dashboard::hierarchy::{refresh, RawInventory};
use zfs_dashboard::model::{CounterUpdate, EntityGraph};
use zfs_dashboard::parse::{inventory, iostat, status};
use zfs_dashboard::telemetry::{SubjectKey, TelemetryEngine, HISTORY_WINDOW};

proptest! {
    #[test]
    fn test_pool_list_never_panics_on_arbitrary_text(text in "\\PC*") {
        // Given: Arbitrary (printable) text
        // Then: Parsing completes without panicking
        let _ = inventory::parse_pool_list(&text);
    }

    #[test]
    fn test_dataset_list_never_panics_on_arbitrary_text(text in "\\PC*") {
        let _ = inventory::parse_dataset_list(&text);
    }

    #[test]
    fn test_snapshot_list_never_panics_on_arbitrary_text(text in "\\PC*") {
        let _ = inventory::parse_snapshot_list(&text);
    }

    #[test]
    fn test_status_never_panics_on_arbitrary_text(text in "\\PC*") {
        let _ = status::parse_status(&text);
    }

    #[test]
    fn test_counter_line_never_panics(line in "\\PC*") {
        let _ = iostat::parse_counter_line(&line);
    }

    #[test]
    fn test_refresh_never_panics_on_arbitrary_blocks(
        pool_list in "\\PC*",
        pool_status in "\\PC*",
        dataset_list in "\\PC*",
        snapshot_list in "\\PC*",
    ) {
        // Given: Arbitrary text for every source
        let raw = RawInventory { pool_list, pool_status, dataset_list, snapshot_list };

        // Then: A refresh always yields a graph, however empty
        let _ = refresh(&raw);
    }

    #[test]
    fn test_short_pool_rows_always_skipped(fields in prop::collection::vec("[a-z0-9]{1,8}", 0..7)) {
        // Given: A row with fewer than 8 tab fields
        let row = fields.join("\t");

        // Then: It never produces a pool
        prop_assert!(inventory::parse_pool_list(&row).is_empty());
    }

    #[test]
    fn test_valid_pool_rows_always_produce_one_pool(fields in prop::collection::vec("[a-z0-9]{1,8}", 8..12)) {
        let row = fields.join("\t");
        let pools = inventory::parse_pool_list(&row);
        prop_assert_eq!(pools.len(), 1);
        prop_assert_eq!(pools[0].name.as_str(), fields[0].as_str());
    }

    #[test]
    fn test_history_never_exceeds_window(samples in prop::collection::vec(0u64..1_000_000, 1..200)) {
        // Given: An arbitrary run of counter samples for one pool
        let mut graph = EntityGraph::default();
        let mut engine = TelemetryEngine::new();
        let key = SubjectKey { pool: "tank".into(), vdev: None };

        for (i, s) in samples.iter().enumerate() {
            engine.apply(&mut graph, CounterUpdate {
                indent: 0,
                name: "tank".into(),
                read_ops: *s,
                write_ops: i as u64,
                read_bytes: 0,
                write_bytes: 0,
            });
        }

        // Then: History is bounded and ends with the newest sample
        let history = engine.history(&key).expect("history exists");
        prop_assert!(history.read_ops.len() <= HISTORY_WINDOW);
        prop_assert!(history.read_ops.len() == samples.len().min(HISTORY_WINDOW));
        prop_assert_eq!(*history.read_ops.back().unwrap(), *samples.last().unwrap());
    }
}
