//! ZFS Dashboard Core
//!
//! Parsing-and-merge engine behind a live ZFS topology dashboard: it turns
//! the textual output of `zpool` / `zfs` inventory commands into a
//! normalized entity graph and continuously merges a streamed `zpool iostat`
//! counter feed into that graph, exposing read-only filtered snapshots to a
//! display collaborator.
//!
//! # Architecture
//!
//! ```text
//!  zpool list ─┐
//!  zpool status├─ raw text ──► parse ──► hierarchy::refresh ─┐
//!  zfs list ───┘                                             ▼
//!                                                     ┌─────────────┐
//!  zpool iostat ──► stream task ──► CounterUpdate ──► │ coordinator │──► watch<Arc<EntityGraph>>
//!  (subprocess)     (bounded mpsc)                    │ (single     │     (filtered snapshots)
//!                                                     │  writer)    │
//!                                                     └─────────────┘
//! ```
//!
//! All graph mutations — wholesale inventory rebuilds and per-interval
//! counter merges — are serialized through the coordinator task. Readers
//! only ever hold fully-built immutable snapshots.
//!
//! # Modules
//!
//! - [`parse`] - tokenizer and parsers for the four inventory formats
//! - [`hierarchy`] - dataset tree assembly and full-graph refresh
//! - [`telemetry`] - counter merge engine with bounded rolling history
//! - [`stream`] - iostat subprocess lifecycle and stream state machine
//! - [`coordinator`] - single-writer actor and snapshot publishing
//! - [`filter`] - visibility predicates over the dataset tree
//! - [`model`] - entity types
//! - [`source`] - inventory command invocation seam
//! - [`config`] - configuration management
//! - [`error`] - error types

pub mod config;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod hierarchy;
pub mod model;
pub mod parse;
pub mod source;
pub mod stream;
pub mod telemetry;
pub mod units;
