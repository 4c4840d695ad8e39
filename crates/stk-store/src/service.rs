//! Service layer orchestrating catalog mutations with the JSONL trail.
//!
//! `AssetService` owns the category index, the trail writer, and the
//! identity seam used by the dashboard. All operations are implemented as
//! `impl AssetService` blocks under `repos/`.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use stk_core::identity::{NoUsers, UserDirectory};
use stk_core::responses::RebuildReport;
use stk_core::trail::{TRAIL_VERSION, TrailOp, TrailOperation};

use crate::catalog::Catalog;
use crate::error::StoreError;
use crate::trail::replayer::TrailReplayer;
use crate::trail::writer::TrailWriter;

/// The asset catalog.
///
/// Every mutation follows this protocol:
/// 1. Take the category's write lock
/// 2. Validate against the schema snapshot
/// 3. Append the trail operation
/// 4. Apply the change in memory
///
/// A failed trail append leaves the catalog untouched.
pub struct AssetService {
    catalog: Catalog,
    trail: TrailWriter,
    users: Arc<dyn UserDirectory>,
}

impl AssetService {
    /// A service with no persistence.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_trail(TrailWriter::disabled())
    }

    #[must_use]
    pub fn from_trail(trail: TrailWriter) -> Self {
        Self {
            catalog: Catalog::default(),
            trail,
            users: Arc::new(NoUsers),
        }
    }

    /// Open the catalog stored under `data_dir`, replaying its trail.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory or trail cannot be read and
    /// `StoreError::Replay` if a trail line cannot be applied.
    pub fn open(data_dir: &Path) -> Result<(Self, RebuildReport), StoreError> {
        let mut service = Self::from_trail(TrailWriter::new(data_dir)?);
        let report = TrailReplayer::rebuild(&mut service)?;
        Ok((service, report))
    }

    /// Attach the identity storage consulted by `dashboard_stats`.
    #[must_use]
    pub fn with_users(mut self, users: Arc<dyn UserDirectory>) -> Self {
        self.users = users;
        self
    }

    #[must_use]
    pub const fn trail(&self) -> &TrailWriter {
        &self.trail
    }

    /// Access the trail writer mutably (e.g., to disable during rebuild).
    pub const fn trail_mut(&mut self) -> &mut TrailWriter {
        &mut self.trail
    }

    pub(crate) const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(crate) fn users(&self) -> &dyn UserDirectory {
        self.users.as_ref()
    }

    /// Append one operation to the trail.
    pub(crate) fn record<T: Serialize>(
        &self,
        op: TrailOp,
        table: &str,
        payload: &T,
    ) -> Result<(), StoreError> {
        if !self.trail.is_enabled() {
            return Ok(());
        }
        self.trail.append(&TrailOperation {
            v: TRAIL_VERSION,
            ts: Utc::now().to_rfc3339(),
            op,
            table: table.to_string(),
            data: serde_json::to_value(payload)?,
        })
    }
}

impl Default for AssetService {
    fn default() -> Self {
        Self::in_memory()
    }
}
