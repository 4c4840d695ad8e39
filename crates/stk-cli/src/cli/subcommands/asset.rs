use clap::{Args, Subcommand};

/// Asset record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AssetCommands {
    /// Add a record.
    Add {
        #[arg(long)]
        table: String,
        /// Attribute as `key=value`. Repeatable.
        #[arg(long)]
        set: Vec<String>,
    },
    /// Find records by identifier.
    Search {
        #[arg(long)]
        table: String,
        identifier: String,
    },
    /// Patch the first record matching an identifier.
    Reassign(ReassignArgs),
    /// Delete the first record matching an identifier.
    Delete {
        #[arg(long)]
        table: String,
        identifier: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ReassignArgs {
    #[arg(long)]
    pub table: String,
    pub identifier: String,
    #[arg(long)]
    pub user_name: Option<String>,
    #[arg(long)]
    pub user_id: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub section: Option<String>,
    #[arg(long)]
    pub date_of_return: Option<String>,
    #[arg(long)]
    pub date_of_reassign: Option<String>,
    #[arg(long)]
    pub date_of_update: Option<String>,
    #[arg(long)]
    pub remarks: Option<String>,
    /// Any other attribute as `key=value`. Repeatable.
    #[arg(long)]
    pub set: Vec<String>,
}
