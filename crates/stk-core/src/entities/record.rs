use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Serialize;

use crate::entities::CategorySchema;
use crate::field::{FieldSpec, FieldValue};
use crate::reserved::{ReservedField, is_reserved_field};

/// One asset of a category.
///
/// `attributes` holds schema fields as of the last write plus any reserved
/// metadata. Values of fields later removed from the schema stay stored but
/// are dropped by [`AssetRecord::project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct AssetRecord {
    pub table: String,
    #[schemars(with = "BTreeMap<String, String>")]
    pub attributes: BTreeMap<String, FieldValue>,
}

impl AssetRecord {
    #[must_use]
    pub fn new(table: &str, attributes: BTreeMap<String, FieldValue>) -> Self {
        Self {
            table: table.to_string(),
            attributes,
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.attributes.get(name)
    }

    /// Whether `field` holds `identifier`.
    ///
    /// The identifier is read as a value of the field's type first, so
    /// `"007"` finds an integer `7`. Stored values that no longer have the
    /// field's type are compared as canonical text.
    #[must_use]
    pub fn matches(&self, field: &FieldSpec, identifier: &str) -> bool {
        let Some(value) = self.get(&field.name) else {
            return false;
        };
        field
            .field_type
            .parse_value(identifier)
            .is_ok_and(|wanted| *value == wanted)
            || value.to_string() == identifier
    }

    /// Active assets have not been returned.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.get(ReservedField::DateOfReturn.as_str())
            .is_none_or(FieldValue::is_blank)
    }

    /// Copy of the record restricted to what `schema` still surfaces:
    /// current schema fields plus reserved metadata.
    #[must_use]
    pub fn project(&self, schema: &CategorySchema) -> Self {
        let attributes = self
            .attributes
            .iter()
            .filter(|(name, _)| schema.has_field(name) || is_reserved_field(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Self {
            table: self.table.clone(),
            attributes,
        }
    }

    /// Attribute map rendered as text, as sent over the boundary.
    #[must_use]
    pub fn flatten(&self) -> BTreeMap<String, String> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect()
    }
}
