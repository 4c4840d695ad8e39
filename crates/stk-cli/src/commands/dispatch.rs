use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Category { action } => commands::category::handle(&action, ctx, flags),
        Commands::Asset { action } => commands::asset::handle(&action, ctx, flags),
        Commands::Stats => commands::stats::handle(ctx, flags),
        Commands::Export(args) => commands::export::handle(&args, ctx, flags),
        Commands::Import(args) => commands::import::handle(&args, ctx, flags),
        Commands::Serve(args) => commands::serve::handle(&args, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
