//! Boundary request payloads.
//!
//! These are the JSON bodies accepted by the transport layer. Attribute values
//! arrive as arbitrary JSON scalars and are converted to text with
//! [`attributes_from_json`] before core validation.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A field as proposed by a client. The type is kept as submitted so that an
/// unrecognized name surfaces as `InvalidFieldList` rather than a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

impl FieldDefinition {
    #[must_use]
    pub fn new(name: &str, field_type: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
        }
    }
}

/// Body of `POST /category` and `POST /category/fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryFieldsRequest {
    pub category_name: String,
    pub fields: Vec<FieldDefinition>,
}

/// Body of `POST /category/field/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDeleteRequest {
    pub category_name: String,
    pub field_name: String,
}

/// Body of `POST /category/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryDeleteRequest {
    pub category_name: String,
}

/// Body of `POST /asset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AssetInput {
    pub table_name: String,
    pub data: BTreeMap<String, Value>,
}

/// Body of `PUT /asset/reassign`: every key besides the two locators is part
/// of the sparse patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReassignRequest {
    pub table_name: String,
    pub identifier: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// One line of a bulk import: the target sheet and the row's cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImportRow {
    pub sheet: String,
    pub data: BTreeMap<String, Value>,
}

/// Convert JSON attribute values to text.
///
/// Strings pass through, numbers and booleans are printed, `null` becomes an
/// empty string (treated as "not provided" downstream).
///
/// # Errors
///
/// Returns the offending key when a value is an array or object.
pub fn attributes_from_json(
    data: &BTreeMap<String, Value>,
) -> Result<BTreeMap<String, String>, String> {
    data.iter()
        .map(|(key, value)| {
            let text = match value {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(format!("value of '{key}' must be a scalar"));
                }
            };
            Ok((key.clone(), text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn reassign_collects_sparse_fields() {
        let req: ReassignRequest = serde_json::from_value(json!({
            "table_name": "laptop",
            "identifier": "LT01",
            "remarks": "reissued",
            "user_name": null
        }))
        .unwrap();
        assert_eq!(req.table_name, "laptop");
        assert_eq!(req.fields.len(), 2);
        assert_eq!(req.fields["remarks"], json!("reissued"));
    }

    #[test]
    fn scalars_become_text() {
        let data = BTreeMap::from([
            ("ram".to_string(), json!(16)),
            ("in_stock".to_string(), json!(true)),
            ("remarks".to_string(), Value::Null),
            ("asset_tag".to_string(), json!("LT01")),
        ]);
        let text = attributes_from_json(&data).unwrap();
        assert_eq!(text["ram"], "16");
        assert_eq!(text["in_stock"], "true");
        assert_eq!(text["remarks"], "");
        assert_eq!(text["asset_tag"], "LT01");
    }

    #[test]
    fn nested_values_rejected() {
        let data = BTreeMap::from([("specs".to_string(), json!({"ram": 16}))]);
        assert_eq!(
            attributes_from_json(&data).unwrap_err(),
            "value of 'specs' must be a scalar"
        );
    }
}
