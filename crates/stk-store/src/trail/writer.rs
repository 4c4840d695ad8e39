//! JSONL trail writer.
//!
//! Appends `TrailOperation` records to `<data_dir>/trail.jsonl` using
//! `serde_jsonlines::append_json_lines`.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use stk_core::trail::TrailOperation;

use super::TRAIL_FILE;
use crate::error::StoreError;

/// Appends trail operations to the data directory's JSONL file.
///
/// Callers append while holding the affected category's write lock. The
/// internal mutex serializes appends coming from different categories.
pub struct TrailWriter {
    path: PathBuf,
    enabled: bool,
    append_lock: Mutex<()>,
}

impl TrailWriter {
    /// Create a writer for `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(TRAIL_FILE),
            enabled: true,
            append_lock: Mutex::new(()),
        })
    }

    /// Create a disabled writer (for tests or when persistence is off).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            path: PathBuf::new(),
            enabled: false,
            append_lock: Mutex::new(()),
        }
    }

    /// Disabled during rebuild to avoid re-writing replayed operations.
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append one operation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file write fails.
    pub fn append(&self, op: &TrailOperation) -> Result<(), StoreError> {
        if !self.enabled {
            return Ok(());
        }
        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        serde_jsonlines::append_json_lines(&self.path, [op])?;
        Ok(())
    }

    /// Path of the trail file. Empty for a disabled writer.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
