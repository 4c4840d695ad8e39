//! Rebuild a service from its JSONL trail.

use std::path::Path;
use std::time::Instant;

use stk_core::responses::RebuildReport;
use stk_core::trail::{
    AssetPayload, FieldsPayload, IdentifierPayload, ReassignPayload, RemoveFieldPayload,
    TRAIL_VERSION, TrailOp, TrailOperation,
};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::service::AssetService;
use crate::updates::reassign::ReassignUpdate;

pub struct TrailReplayer;

impl TrailReplayer {
    /// Replay the service's trail file into it.
    ///
    /// Operations go through the regular service methods with trail writing
    /// disabled, so every line is re-validated. A missing trail file is an
    /// empty catalog, not an error.
    ///
    /// # Errors
    ///
    /// `StoreError::Io` if the file cannot be opened; `StoreError::Replay`
    /// naming the first line that fails to decode or apply.
    pub fn rebuild(service: &mut AssetService) -> Result<RebuildReport, StoreError> {
        let start = Instant::now();
        let path = service.trail().path().to_path_buf();

        if !service.trail().is_enabled() || !path.exists() {
            return Ok(RebuildReport {
                rebuilt: false,
                operations_replayed: 0,
                categories: 0,
                assets: 0,
                duration_ms: 0,
            });
        }

        service.trail_mut().set_enabled(false);
        let replayed = replay_file(service, &path);
        service.trail_mut().set_enabled(true);
        let operations_replayed = replayed?;

        let stats = service.dashboard_stats();
        let report = RebuildReport {
            rebuilt: true,
            operations_replayed,
            categories: stats.category_count,
            assets: stats.asset_count,
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        info!(
            operations = report.operations_replayed,
            categories = report.categories,
            assets = report.assets,
            "trail replayed"
        );
        Ok(report)
    }
}

fn replay_file(service: &AssetService, path: &Path) -> Result<u32, StoreError> {
    let mut replayed = 0u32;
    for (idx, op) in serde_jsonlines::json_lines::<TrailOperation, _>(path)?.enumerate() {
        let line = idx + 1;
        let op = op.map_err(|e| {
            warn!(line, error = %e, "undecodable trail line");
            StoreError::Replay {
                line,
                reason: e.to_string(),
            }
        })?;
        if op.v != TRAIL_VERSION {
            return Err(StoreError::Replay {
                line,
                reason: format!("unsupported trail version {}", op.v),
            });
        }
        apply(service, &op).map_err(|e| {
            warn!(line, op = %op.op, table = %op.table, error = %e, "trail operation no longer applies");
            StoreError::Replay {
                line,
                reason: format!("{} on '{}': {e}", op.op, op.table),
            }
        })?;
        replayed += 1;
    }
    Ok(replayed)
}

fn apply(service: &AssetService, op: &TrailOperation) -> Result<(), StoreError> {
    let table = op.table.as_str();
    match op.op {
        TrailOp::CreateCategory => {
            let payload: FieldsPayload = serde_json::from_value(op.data.clone())?;
            service.create_category(table, &payload.fields)?;
        }
        TrailOp::AddFields => {
            let payload: FieldsPayload = serde_json::from_value(op.data.clone())?;
            service.add_fields(table, &payload.fields)?;
        }
        TrailOp::RemoveField => {
            let payload: RemoveFieldPayload = serde_json::from_value(op.data.clone())?;
            service.remove_field(table, &payload.field)?;
        }
        TrailOp::RemoveCategory => service.remove_category(table)?,
        TrailOp::AddAsset => {
            let payload: AssetPayload = serde_json::from_value(op.data.clone())?;
            service.add_asset(table, &payload.attributes)?;
        }
        TrailOp::Reassign => {
            let payload: ReassignPayload = serde_json::from_value(op.data.clone())?;
            service.reassign(table, &payload.identifier, &ReassignUpdate::new(payload.patch))?;
        }
        TrailOp::DeleteAsset => {
            let payload: IdentifierPayload = serde_json::from_value(op.data.clone())?;
            service.delete_asset(table, &payload.identifier)?;
        }
    }
    Ok(())
}
