//! # stk-store
//!
//! The asset catalog: category schemas, their records, and the derived views
//! (dashboard counts, export sheets) computed from them.
//!
//! Everything lives in memory inside [`AssetService`]. Each category sits in
//! its own lock so operations on different categories never contend. Every
//! successful mutation is appended to a JSONL trail, and a service opened on
//! a data directory rebuilds itself by replaying that trail.

pub mod error;
pub mod repos;
pub mod service;
pub mod trail;
pub mod updates;

mod catalog;
mod test_support;
mod validate;

pub use error::StoreError;
pub use service::AssetService;
pub use updates::reassign::{ReassignUpdate, ReassignUpdateBuilder};
