use clap::{Args, Subcommand};

use crate::cli::subcommands::{AssetCommands, CategoryCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Category schemas.
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },
    /// Asset records.
    Asset {
        #[command(subcommand)]
        action: AssetCommands,
    },
    /// Catalog counts.
    Stats,
    /// Export categories as sheets.
    Export(ExportArgs),
    /// Bulk-import rows from a JSONL file.
    Import(ImportArgs),
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Print the JSON Schema of a request or response type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Export a single category instead of all of them.
    #[arg(long)]
    pub table: Option<String>,
    /// Write one `<sheet>.jsonl` file per sheet into this directory.
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// JSONL file, one `{"sheet": .., "data": {..}}` object per line.
    pub file: String,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address (defaults to server.bind).
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered schema name; omit to list them.
    pub type_name: Option<String>,
}
