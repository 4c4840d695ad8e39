//! JSONL trail writer and replayer.
//!
//! The trail is the source of truth for all mutations. It lives in a single
//! `trail.jsonl` under the data directory and the catalog is rebuildable
//! from it.

pub mod replayer;
pub mod writer;

/// File name of the trail inside the data directory.
pub const TRAIL_FILE: &str = "trail.jsonl";
