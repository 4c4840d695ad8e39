//! Operations on the catalog.
//!
//! Each module adds methods to `AssetService` via `impl AssetService` blocks.

pub mod asset;
pub mod category;
pub mod export;
pub mod import;
pub mod stats;
