//! Bulk ingestion of `{sheet, data}` rows.
//!
//! Each row is an independent `add_asset`. Failures are collected and
//! earlier successes are kept.

use std::io::BufRead;

use stk_core::entities::AssetRecord;
use stk_core::errors::CoreError;
use stk_core::names::normalize_category_name;
use stk_core::requests::{ImportRow, attributes_from_json};
use stk_core::responses::{ImportFailure, ImportReport};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::service::AssetService;

impl AssetService {
    /// Add one import row to its sheet's category.
    ///
    /// # Errors
    ///
    /// Whatever `add_asset` reports, or `Validation` for a non-scalar cell.
    pub fn import_row(&self, row: &ImportRow) -> Result<AssetRecord, StoreError> {
        let attributes = attributes_from_json(&row.data).map_err(|problem| {
            CoreError::Validation {
                category: normalize_category_name(&row.sheet),
                problems: vec![problem],
            }
        })?;
        self.add_asset(&row.sheet, &attributes)
    }

    /// Import already-decoded rows. `row` in failures is the 1-based index.
    pub fn import_rows(&self, rows: &[ImportRow]) -> ImportReport {
        let mut report = ImportReport::default();
        for (idx, row) in rows.iter().enumerate() {
            self.import_one(&mut report, idx + 1, row);
        }
        report
    }

    /// Import JSONL rows from a reader. Blank lines are skipped; a line that
    /// is not a valid row counts as a failure. `on_row` is called after each
    /// processed row with the running total.
    ///
    /// # Errors
    ///
    /// `StoreError::Io` if reading fails. Row-level problems never abort.
    pub fn import_reader<R: BufRead>(
        &self,
        reader: R,
        mut on_row: impl FnMut(usize),
    ) -> Result<ImportReport, StoreError> {
        let mut report = ImportReport::default();
        // Lines are decoded one at a time so a bad line fails only its row.
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ImportRow>(&line) {
                Ok(row) => self.import_one(&mut report, idx + 1, &row),
                Err(e) => {
                    report.total_rows += 1;
                    warn!(line = idx + 1, error = %e, "malformed import row");
                    report.failed.push(ImportFailure {
                        row: idx + 1,
                        sheet: String::new(),
                        error: format!("malformed row: {e}"),
                    });
                }
            }
            on_row(report.total_rows);
        }
        debug!(
            total = report.total_rows,
            succeeded = report.succeeded,
            failed = report.failed.len(),
            "import finished"
        );
        Ok(report)
    }

    fn import_one(&self, report: &mut ImportReport, row_number: usize, row: &ImportRow) {
        report.total_rows += 1;
        match self.import_row(row) {
            Ok(_) => report.succeeded += 1,
            Err(e) => report.failed.push(ImportFailure {
                row: row_number,
                sheet: normalize_category_name(&row.sheet),
                error: e.to_string(),
            }),
        }
    }
}
