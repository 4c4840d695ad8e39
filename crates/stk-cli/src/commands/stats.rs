use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `stk stats`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.service.dashboard_stats(), flags.format)
}
