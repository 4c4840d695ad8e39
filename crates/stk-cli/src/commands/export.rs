use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Serialize;
use stk_core::names::is_path_safe_category;
use stk_core::responses::ExportSheet;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::{output, output_sheets};

#[derive(Debug, Serialize)]
struct WrittenSheet {
    name: String,
    rows: usize,
    path: PathBuf,
}

/// Handle `stk export`.
pub fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let sheets = match &args.table {
        Some(table) => vec![ctx.service.export_table(table)?],
        None => ctx.service.export_all().sheets,
    };

    match &args.out {
        Some(dir) => {
            let written = write_sheets(Path::new(dir), &sheets)?;
            output(&written, flags.format)
        }
        None => output_sheets(&sheets, flags.format),
    }
}

/// Write each sheet to `<dir>/<name>.jsonl`, one header-keyed object per row.
fn write_sheets(dir: &Path, sheets: &[ExportSheet]) -> anyhow::Result<Vec<WrittenSheet>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;

    sheets
        .iter()
        .map(|sheet| {
            if !is_path_safe_category(&sheet.name) {
                bail!("refusing to export sheet '{}' outside {}", sheet.name, dir.display());
            }
            let path = dir.join(format!("{}.jsonl", sheet.name));
            serde_jsonlines::write_json_lines(&path, sheet.keyed_rows())
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::debug!(sheet = %sheet.name, rows = sheet.rows.len(), "sheet exported");
            Ok(WrittenSheet {
                name: sheet.name.clone(),
                rows: sheet.rows.len(),
                path,
            })
        })
        .collect()
}
