use clap::Subcommand;

/// Category schema commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CategoryCommands {
    /// Create a category.
    Create {
        name: String,
        /// Field as `name:type` (text, integer, float, boolean, date). Repeatable.
        #[arg(long = "field", required = true)]
        fields: Vec<String>,
    },
    /// Add fields to an existing category.
    AddFields {
        name: String,
        #[arg(long = "field", required = true)]
        fields: Vec<String>,
    },
    /// Remove one field from a category.
    RemoveField { name: String, field: String },
    /// Delete a category and all of its records.
    Delete { name: String },
    /// List categories.
    List,
    /// Show one category's schema.
    Get { name: String },
}
