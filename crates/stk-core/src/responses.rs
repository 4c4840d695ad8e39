//! Response types returned by the service and serialized by `stk` commands
//! and the HTTP transport.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Acknowledgement for operations with no payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Snapshot served by `GET /dashboard-stats`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardStats {
    pub category_count: usize,
    pub asset_count: usize,
    pub user_count: usize,
    pub asset_counts_by_category: BTreeMap<String, usize>,
    pub active_asset_counts_by_category: BTreeMap<String, usize>,
}

/// One category flattened to a header row plus text cells.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportSheet {
    /// Rows as header-keyed maps, the shape written to per-sheet JSONL files.
    #[must_use]
    pub fn keyed_rows(&self) -> Vec<BTreeMap<String, String>> {
        self.rows
            .iter()
            .map(|row| self.headers.iter().cloned().zip(row.iter().cloned()).collect())
            .collect()
    }
}

/// Multi-sheet export artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Workbook {
    pub sheets: Vec<ExportSheet>,
}

/// A bulk-import row that could not be added.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportFailure {
    /// 1-based position of the row in the input.
    pub row: usize,
    pub sheet: String,
    pub error: String,
}

/// Outcome of a bulk import. Successful rows are kept even when others fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportReport {
    pub total_rows: usize,
    pub succeeded: usize,
    pub failed: Vec<ImportFailure>,
}

/// Outcome of replaying the trail at startup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RebuildReport {
    pub rebuilt: bool,
    pub operations_replayed: u32,
    pub categories: usize,
    pub assets: usize,
    pub duration_ms: u64,
}

/// Error body returned by the transport.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
}
