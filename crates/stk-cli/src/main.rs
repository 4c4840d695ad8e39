use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod trail_lock;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("stk error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = bootstrap::load_config().context("failed to load stockroom configuration")?;
    let default_format = cli::OutputFormat::from_config(&config.general.default_format)
        .unwrap_or(cli::OutputFormat::Json);
    let flags = cli.global_flags(default_format);
    ui::init(&flags);

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let data_dir = bootstrap::resolve_data_dir(&flags, &config);
    let command = cli.command;
    let trail_lock = if command_requires_write_lock(&command) {
        Some(trail_lock::acquire(&data_dir, command_label(&command)).await?)
    } else {
        None
    };

    let ctx = context::AppContext::init(data_dir, config)
        .context("failed to initialize stockroom application context")?;

    let result = commands::dispatch::dispatch(command, &ctx, &flags).await;
    drop(trail_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("STOCKROOM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Commands that append to the trail hold the data-directory lock for their
/// whole run. `serve` mutates on behalf of clients until it exits.
fn command_requires_write_lock(command: &cli::Commands) -> bool {
    use crate::cli::subcommands::{AssetCommands, CategoryCommands};

    match command {
        cli::Commands::Category { action } => !matches!(
            action,
            CategoryCommands::List | CategoryCommands::Get { .. }
        ),
        cli::Commands::Asset { action } => !matches!(action, AssetCommands::Search { .. }),
        cli::Commands::Import(_) | cli::Commands::Serve(_) => true,
        cli::Commands::Stats | cli::Commands::Export(_) | cli::Commands::Schema(_) => false,
    }
}

/// Command name as typed, recorded in the trail lock.
fn command_label(command: &cli::Commands) -> &'static str {
    use crate::cli::subcommands::{AssetCommands, CategoryCommands};

    match command {
        cli::Commands::Category { action } => match action {
            CategoryCommands::Create { .. } => "category create",
            CategoryCommands::AddFields { .. } => "category add-fields",
            CategoryCommands::RemoveField { .. } => "category remove-field",
            CategoryCommands::Delete { .. } => "category delete",
            CategoryCommands::List => "category list",
            CategoryCommands::Get { .. } => "category get",
        },
        cli::Commands::Asset { action } => match action {
            AssetCommands::Add { .. } => "asset add",
            AssetCommands::Search { .. } => "asset search",
            AssetCommands::Reassign(_) => "asset reassign",
            AssetCommands::Delete { .. } => "asset delete",
        },
        cli::Commands::Stats => "stats",
        cli::Commands::Export(_) => "export",
        cli::Commands::Import(_) => "import",
        cli::Commands::Serve(_) => "serve",
        cli::Commands::Schema(_) => "schema",
    }
}
