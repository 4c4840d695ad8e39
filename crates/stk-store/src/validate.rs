//! Attribute validation against a schema snapshot.
//!
//! Runs under the category's write lock, before anything is mutated.

use std::collections::BTreeMap;

use stk_core::entities::CategorySchema;
use stk_core::errors::CoreError;
use stk_core::field::{FieldType, FieldValue};
use stk_core::names::normalize_field_name;
use stk_core::reserved::ReservedField;

/// Type of `key` in `schema`: the declared field type, else the reserved
/// metadata type, else `None` for keys the category does not accept.
pub(crate) fn accepted_type(schema: &CategorySchema, key: &str) -> Option<FieldType> {
    schema
        .field(key)
        .map(|spec| spec.field_type)
        .or_else(|| ReservedField::from_name(key).map(ReservedField::field_type))
}

/// Outcome of checking a raw attribute map.
struct Checked {
    values: BTreeMap<String, FieldValue>,
    /// Keys that already produced a problem.
    flagged: Vec<String>,
    problems: Vec<String>,
}

/// Normalize keys, drop blank values, and type-check the rest.
fn check_attributes(schema: &CategorySchema, raw: &BTreeMap<String, String>) -> Checked {
    let mut checked = Checked {
        values: BTreeMap::new(),
        flagged: Vec::new(),
        problems: Vec::new(),
    };
    let mut seen: Vec<String> = Vec::new();

    for (raw_key, raw_value) in raw {
        let key = normalize_field_name(raw_key);
        if key.is_empty() {
            checked.problems.push("attribute name is empty".to_string());
            continue;
        }
        if seen.contains(&key) {
            checked
                .problems
                .push(format!("field '{key}' given more than once"));
            checked.flagged.push(key);
            continue;
        }
        seen.push(key.clone());

        let Some(field_type) = accepted_type(schema, &key) else {
            checked.problems.push(format!("unknown field '{key}'"));
            continue;
        };
        if raw_value.trim().is_empty() {
            continue;
        }
        match field_type.parse_value(raw_value) {
            Ok(value) => {
                checked.values.insert(key, value);
            }
            Err(reason) => {
                checked.problems.push(format!("field '{key}': {reason}"));
                checked.flagged.push(key);
            }
        }
    }
    checked
}

fn into_result(
    schema: &CategorySchema,
    checked: Checked,
) -> Result<BTreeMap<String, FieldValue>, CoreError> {
    if checked.problems.is_empty() {
        Ok(checked.values)
    } else {
        Err(CoreError::Validation {
            category: schema.table_name.clone(),
            problems: checked.problems,
        })
    }
}

/// Validate the attributes of a new record.
///
/// Every required field must be present and non-blank. Blank optional values
/// are dropped.
pub(crate) fn new_record(
    schema: &CategorySchema,
    raw: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, FieldValue>, CoreError> {
    let mut checked = check_attributes(schema, raw);
    for spec in schema.required_fields() {
        if !checked.values.contains_key(&spec.name) && !checked.flagged.contains(&spec.name) {
            checked
                .problems
                .push(format!("missing required field '{}'", spec.name));
        }
    }
    into_result(schema, checked)
}

/// Validate a sparse reassignment patch. Blank values are dropped.
pub(crate) fn patch(
    schema: &CategorySchema,
    raw: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, FieldValue>, CoreError> {
    into_result(schema, check_attributes(schema, raw))
}
