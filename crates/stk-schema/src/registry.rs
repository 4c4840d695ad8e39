//! Central schema registry for all Stockroom boundary types.

use std::collections::HashMap;

use jsonschema::Validator;
use schemars::schema_for;
use serde_json::Value;

use crate::error::SchemaError;

struct Entry {
    schema: Value,
    validator: Validator,
}

/// Compiled JSON Schemas, looked up by name.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Entry>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {{
        let schema = serde_json::to_value(schema_for!($ty))
            .map_err(|e| SchemaError::Generation(format!("{}: {e}", $name)))?;
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| SchemaError::Generation(format!("{}: {e}", $name)))?;
        $map.insert($name, Entry { schema, validator });
    }};
}

impl SchemaRegistry {
    /// Build a registry with every request, response, entity, and trail schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Generation` if a generated schema fails to compile.
    pub fn new() -> Result<Self, SchemaError> {
        let mut schemas = HashMap::new();

        // Requests
        register!(
            schemas,
            "category_fields_request",
            stk_core::requests::CategoryFieldsRequest
        );
        register!(
            schemas,
            "field_delete_request",
            stk_core::requests::FieldDeleteRequest
        );
        register!(
            schemas,
            "category_delete_request",
            stk_core::requests::CategoryDeleteRequest
        );
        register!(schemas, "asset_input", stk_core::requests::AssetInput);
        register!(schemas, "reassign_request", stk_core::requests::ReassignRequest);
        register!(schemas, "import_row", stk_core::requests::ImportRow);

        // Entities
        register!(schemas, "category_schema", stk_core::entities::CategorySchema);
        register!(schemas, "asset_record", stk_core::entities::AssetRecord);

        // Trail envelope
        register!(schemas, "trail_operation", stk_core::trail::TrailOperation);

        // Responses
        register!(schemas, "ack", stk_core::responses::Ack);
        register!(schemas, "dashboard_stats", stk_core::responses::DashboardStats);
        register!(schemas, "workbook", stk_core::responses::Workbook);
        register!(schemas, "import_report", stk_core::responses::ImportReport);
        register!(schemas, "rebuild_report", stk_core::responses::RebuildReport);
        register!(schemas, "error_body", stk_core::responses::ErrorBody);

        Ok(Self { schemas })
    }

    /// Get a schema by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name).map(|entry| &entry.schema)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` listing every violation.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let entry = self
            .schemas
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let errors: Vec<String> = entry
            .validator
            .iter_errors(instance)
            .map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    format!("{e}")
                } else {
                    format!("{path}: {e}")
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// All registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
