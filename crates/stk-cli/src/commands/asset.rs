use std::collections::BTreeMap;

use stk_core::entities::AssetRecord;
use stk_core::reserved::ReservedField;
use stk_core::responses::Ack;
use stk_store::{ReassignUpdate, ReassignUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AssetCommands, ReassignArgs};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_assignments;
use crate::context::AppContext;
use crate::output::output;

/// Handle `stk asset`.
pub fn handle(
    action: &AssetCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        AssetCommands::Add { table, set } => {
            let record = service.add_asset(table, &parse_assignments(set)?)?;
            output(&record.flatten(), flags.format)
        }
        AssetCommands::Search { table, identifier } => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let hits = service.search(table, identifier)?;
            if hits.len() > limit {
                tracing::info!(total = hits.len(), shown = limit, "search output truncated");
            }
            let rows: Vec<BTreeMap<String, String>> =
                hits.iter().take(limit).map(AssetRecord::flatten).collect();
            output(&rows, flags.format)
        }
        AssetCommands::Reassign(args) => {
            let update = reassign_update(args)?;
            let record = service.reassign(&args.table, &args.identifier, &update)?;
            output(&record.flatten(), flags.format)
        }
        AssetCommands::Delete { table, identifier } => {
            service.delete_asset(table, identifier)?;
            output(
                &Ack::new(format!("Asset '{identifier}' deleted from '{table}'")),
                flags.format,
            )
        }
    }
}

/// Reserved-field flags first, then `--set` pairs on top.
fn reassign_update(args: &ReassignArgs) -> anyhow::Result<ReassignUpdate> {
    let reserved = [
        (ReservedField::UserName, &args.user_name),
        (ReservedField::UserId, &args.user_id),
        (ReservedField::Email, &args.email),
        (ReservedField::Department, &args.department),
        (ReservedField::Location, &args.location),
        (ReservedField::Section, &args.section),
        (ReservedField::DateOfReturn, &args.date_of_return),
        (ReservedField::DateOfReassign, &args.date_of_reassign),
        (ReservedField::DateOfUpdate, &args.date_of_update),
        (ReservedField::Remarks, &args.remarks),
    ];

    let mut builder = ReassignUpdateBuilder::new();
    for (field, value) in reserved {
        if let Some(value) = value {
            builder = builder.reserved(field, value.as_str());
        }
    }
    for (key, value) in parse_assignments(&args.set)? {
        builder = builder.field(key, value);
    }
    Ok(builder.build())
}
