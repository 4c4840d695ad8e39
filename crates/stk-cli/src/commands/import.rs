use std::io::BufReader;

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `stk import`.
pub fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read import file {}", args.file))?;
    let total = content.lines().filter(|line| !line.trim().is_empty()).count();

    let progress = Progress::bar(u64::try_from(total)?, "importing rows");
    let report = ctx
        .service
        .import_reader(BufReader::new(content.as_bytes()), |done| {
            progress.set_position(u64::try_from(done).unwrap_or(u64::MAX));
        })
        .context("import aborted")?;
    progress.finish_ok(&format!(
        "{} imported, {} failed",
        report.succeeded,
        report.failed.len()
    ));

    if !report.failed.is_empty() {
        tracing::warn!(failed = report.failed.len(), "some rows were not imported");
    }
    output(&report, flags.format)
}
