use stk_core::responses::Ack;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CategoryCommands;
use crate::commands::shared::parse::parse_field_specs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `stk category`.
pub fn handle(
    action: &CategoryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        CategoryCommands::Create { name, fields } => {
            let schema = service.create_category(name, &parse_field_specs(fields)?)?;
            output(&schema, flags.format)
        }
        CategoryCommands::AddFields { name, fields } => {
            let schema = service.add_fields(name, &parse_field_specs(fields)?)?;
            output(&schema, flags.format)
        }
        CategoryCommands::RemoveField { name, field } => {
            let schema = service.remove_field(name, field)?;
            output(&schema, flags.format)
        }
        CategoryCommands::Delete { name } => {
            service.remove_category(name)?;
            output(&Ack::new(format!("Category '{name}' deleted")), flags.format)
        }
        CategoryCommands::List => output(&service.list_categories(), flags.format),
        CategoryCommands::Get { name } => output(&service.get_category(name)?, flags.format),
    }
}
