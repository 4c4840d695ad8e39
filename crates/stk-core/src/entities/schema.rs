use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::field::FieldSpec;
use crate::names::is_identifying_field;
use crate::reserved::is_reserved_field;

/// The field list of one asset category.
///
/// Serializes as `{"table": ..., "fields": [{"name": ..., "type": ...}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategorySchema {
    #[serde(rename = "table")]
    pub table_name: String,
    pub fields: Vec<FieldSpec>,
}

impl CategorySchema {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Identifying fields in schema order; lookups try them in this order.
    pub fn identifier_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| is_identifying_field(&f.name))
    }

    /// Fields that must be present and non-empty on creation.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| !is_reserved_field(&f.name))
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}
