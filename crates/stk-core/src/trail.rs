//! JSONL trail operation envelope.
//!
//! Every successful mutation is recorded as a `TrailOperation` in
//! `<data_dir>/trail.jsonl`. The in-memory catalog is rebuildable from it.
//!
//! The `v` field supports payload versioning: lines without a `v` field
//! deserialize with `v == 1` via `#[serde(default)]`.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::requests::FieldDefinition;

/// Current trail payload version.
pub const TRAIL_VERSION: u32 = 1;

const fn default_trail_version() -> u32 {
    TRAIL_VERSION
}

/// Kind of mutation recorded in the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrailOp {
    CreateCategory,
    AddFields,
    RemoveField,
    RemoveCategory,
    AddAsset,
    Reassign,
    DeleteAsset,
}

impl TrailOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateCategory => "create_category",
            Self::AddFields => "add_fields",
            Self::RemoveField => "remove_field",
            Self::RemoveCategory => "remove_category",
            Self::AddAsset => "add_asset",
            Self::Reassign => "reassign",
            Self::DeleteAsset => "delete_asset",
        }
    }
}

impl fmt::Display for TrailOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operation recorded in the JSONL trail.
///
/// `data` holds one of the payload structs below, depending on `op`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrailOperation {
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// RFC 3339 timestamp of the operation.
    pub ts: String,

    pub op: TrailOp,

    /// Category the operation applied to.
    pub table: String,

    pub data: serde_json::Value,
}

/// Payload of `create_category` and `add_fields`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldsPayload {
    pub fields: Vec<FieldDefinition>,
}

/// Payload of `remove_field`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RemoveFieldPayload {
    pub field: String,
}

/// Payload of `add_asset`: the attributes as written, in canonical text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssetPayload {
    pub attributes: BTreeMap<String, String>,
}

/// Payload of `reassign`: the patch after blank values were dropped.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReassignPayload {
    pub identifier: String,
    pub patch: BTreeMap<String, String>,
}

/// Payload of `delete_asset`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IdentifierPayload {
    pub identifier: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_op_default_version() {
        let json = r#"{"ts":"2026-01-01T00:00:00Z","op":"remove_category","table":"laptop","data":{}}"#;
        let op: TrailOperation = serde_json::from_str(json).unwrap();
        assert_eq!(op.v, 1);
        assert_eq!(op.op, TrailOp::RemoveCategory);
    }

    #[test]
    fn reassign_payload_decodes_from_data() {
        let json = r#"{"v":1,"ts":"2026-01-01T00:00:00Z","op":"reassign","table":"laptop","data":{"identifier":"LT01","patch":{"remarks":"x"}}}"#;
        let op: TrailOperation = serde_json::from_str(json).unwrap();
        let payload: ReassignPayload = serde_json::from_value(op.data).unwrap();
        assert_eq!(payload.identifier, "LT01");
        assert_eq!(payload.patch["remarks"], "x");
    }

    #[test]
    fn op_names_match_serde() {
        for op in [
            TrailOp::CreateCategory,
            TrailOp::AddFields,
            TrailOp::RemoveField,
            TrailOp::RemoveCategory,
            TrailOp::AddAsset,
            TrailOp::Reassign,
            TrailOp::DeleteAsset,
        ] {
            let json = serde_json::to_value(op).unwrap();
            assert_eq!(json, serde_json::Value::String(op.as_str().to_string()));
        }
    }
}
