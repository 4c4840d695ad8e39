//! Category repository: schema creation, evolution, and removal.

use std::sync::Arc;

use stk_core::entities::CategorySchema;
use stk_core::errors::CoreError;
use stk_core::field::FieldSpec;
use stk_core::names::{
    is_identifying_field, is_path_safe_category, is_reserved_category, normalize_category_name,
    normalize_field_name,
};
use stk_core::requests::FieldDefinition;
use stk_core::trail::{FieldsPayload, RemoveFieldPayload, TrailOp};
use tracing::{debug, info};

use crate::catalog::CategorySlot;
use crate::error::StoreError;
use crate::service::AssetService;

/// Parse a field batch, rejecting empty batches and bad definitions.
fn parse_fields(fields: &[FieldDefinition]) -> Result<Vec<FieldSpec>, CoreError> {
    if fields.is_empty() {
        return Err(CoreError::InvalidFieldList("no fields given".into()));
    }
    fields.iter().map(FieldSpec::from_definition).collect()
}

fn definitions(specs: &[FieldSpec]) -> Vec<FieldDefinition> {
    specs
        .iter()
        .map(|spec| FieldDefinition::new(&spec.name, spec.field_type.as_str()))
        .collect()
}

impl AssetService {
    /// Create a category with an initial field list.
    ///
    /// # Errors
    ///
    /// `DuplicateCategory` if the name exists or is reserved;
    /// `InvalidFieldList` if the list is empty, repeats a name, has a bad
    /// type, or has no identifying field.
    pub fn create_category(
        &self,
        name: &str,
        fields: &[FieldDefinition],
    ) -> Result<CategorySchema, StoreError> {
        let name = normalize_category_name(name);
        if name.is_empty() {
            return Err(CoreError::InvalidFieldList("category name is empty".into()).into());
        }
        if !is_path_safe_category(&name) {
            return Err(CoreError::InvalidFieldList(format!(
                "category name '{}' must not contain path separators, '..' or control characters",
                name.escape_default()
            ))
            .into());
        }
        if is_reserved_category(&name) {
            return Err(CoreError::DuplicateCategory { name }.into());
        }

        let mut index = self.catalog().write();
        if index.contains(&name) {
            return Err(CoreError::DuplicateCategory { name }.into());
        }

        let specs = parse_fields(fields)?;
        for (pos, spec) in specs.iter().enumerate() {
            if specs[..pos].iter().any(|earlier| earlier.name == spec.name) {
                return Err(CoreError::InvalidFieldList(format!(
                    "field '{}' listed more than once",
                    spec.name
                ))
                .into());
            }
        }
        if !specs.iter().any(|spec| is_identifying_field(&spec.name)) {
            return Err(CoreError::InvalidFieldList(
                "an identifying field (asset_tag or asset_code) is required".into(),
            )
            .into());
        }

        self.record(
            TrailOp::CreateCategory,
            &name,
            &FieldsPayload {
                fields: definitions(&specs),
            },
        )?;

        let schema = CategorySchema {
            table_name: name,
            fields: specs,
        };
        index.insert(Arc::new(CategorySlot::new(schema.clone())));
        info!(table = %schema.table_name, fields = schema.fields.len(), "category created");
        Ok(schema)
    }

    /// Append fields to an existing schema. All-or-nothing.
    ///
    /// Existing records are not back-filled.
    ///
    /// # Errors
    ///
    /// `UnknownCategory`; `FieldAlreadyExists` for the first name colliding
    /// with the schema or an earlier entry of the batch; `InvalidFieldList`
    /// for an empty batch or a bad definition.
    pub fn add_fields(
        &self,
        name: &str,
        fields: &[FieldDefinition],
    ) -> Result<CategorySchema, StoreError> {
        let name = normalize_category_name(name);
        let slot = self.catalog().slot(&name)?;
        let mut state = slot.write()?;

        let specs = parse_fields(fields)?;
        for (pos, spec) in specs.iter().enumerate() {
            if state.schema.has_field(&spec.name)
                || specs[..pos].iter().any(|earlier| earlier.name == spec.name)
            {
                return Err(CoreError::FieldAlreadyExists {
                    category: name,
                    field: spec.name.clone(),
                }
                .into());
            }
        }

        self.record(
            TrailOp::AddFields,
            &name,
            &FieldsPayload {
                fields: definitions(&specs),
            },
        )?;

        state.schema.fields.extend(specs);
        info!(table = %name, fields = state.schema.fields.len(), "fields added");
        Ok(state.schema.clone())
    }

    /// Drop a field from the schema. Stored values stay but are hidden from
    /// schema-aware reads.
    ///
    /// # Errors
    ///
    /// `UnknownCategory`; `UnknownField`; `InvalidFieldList` when the field
    /// is the last identifying field.
    pub fn remove_field(&self, name: &str, field: &str) -> Result<CategorySchema, StoreError> {
        let name = normalize_category_name(name);
        let field = normalize_field_name(field);
        let slot = self.catalog().slot(&name)?;
        let mut state = slot.write()?;

        if !state.schema.has_field(&field) {
            return Err(CoreError::UnknownField {
                category: name,
                field,
            }
            .into());
        }
        if is_identifying_field(&field) && state.schema.identifier_fields().count() == 1 {
            return Err(CoreError::InvalidFieldList(format!(
                "cannot remove '{field}', the last identifying field of '{name}'"
            ))
            .into());
        }

        self.record(
            TrailOp::RemoveField,
            &name,
            &RemoveFieldPayload {
                field: field.clone(),
            },
        )?;

        state.schema.fields.retain(|spec| spec.name != field);
        info!(table = %name, field = %field, "field removed");
        Ok(state.schema.clone())
    }

    /// Remove a category and all of its records.
    ///
    /// # Errors
    ///
    /// `UnknownCategory`.
    pub fn remove_category(&self, name: &str) -> Result<(), StoreError> {
        let name = normalize_category_name(name);
        let slot = self.catalog().slot(&name)?;
        let mut state = slot.write()?;

        self.record(TrailOp::RemoveCategory, &name, &serde_json::json!({}))?;

        state.dropped = true;
        let removed = state.records.len();
        state.records.clear();
        self.catalog().write().remove(&slot);
        info!(table = %name, records = removed, "category removed");
        Ok(())
    }

    /// All schemas in creation order.
    #[must_use]
    pub fn list_categories(&self) -> Vec<CategorySchema> {
        self.catalog()
            .slots()
            .iter()
            .filter_map(|slot| slot.read().ok().map(|state| state.schema.clone()))
            .collect()
    }

    /// One schema by name.
    ///
    /// # Errors
    ///
    /// `UnknownCategory`.
    pub fn get_category(&self, name: &str) -> Result<CategorySchema, StoreError> {
        let name = normalize_category_name(name);
        debug!(table = %name, "get category");
        let slot = self.catalog().slot(&name)?;
        let state = slot.read()?;
        Ok(state.schema.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use stk_core::field::FieldType;

    use crate::test_support::helpers::{defs, laptop_service, test_service};

    use super::*;

    fn core(err: StoreError) -> CoreError {
        match err {
            StoreError::Core(err) => err,
            other => panic!("expected core error, got {other:?}"),
        }
    }

    #[test]
    fn create_then_list_contains_once() {
        let svc = test_service();
        let schema = svc
            .create_category("Laptop", &defs(&[("Asset Tag", "text"), ("RAM", "int")]))
            .unwrap();
        assert_eq!(schema.table_name, "Laptop");
        assert_eq!(
            schema.fields,
            vec![
                FieldSpec::new("asset_tag", FieldType::Text),
                FieldSpec::new("ram", FieldType::Integer),
            ]
        );
        let listed = svc.list_categories();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], schema);
    }

    #[test]
    fn second_create_is_duplicate() {
        let svc = laptop_service();
        let err = svc
            .create_category("laptop", &defs(&[("asset_tag", "text")]))
            .unwrap_err();
        assert_eq!(
            core(err),
            CoreError::DuplicateCategory {
                name: "laptop".into()
            }
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let svc = laptop_service();
        assert!(
            svc.create_category("Laptop", &defs(&[("asset_tag", "text")]))
                .is_ok()
        );
        assert_eq!(svc.list_categories().len(), 2);
    }

    #[rstest]
    #[case::category_info("category_info")]
    #[case::users("users")]
    #[case::padded("  users ")]
    fn reserved_names_are_duplicates(#[case] name: &str) {
        let svc = test_service();
        let err = svc
            .create_category(name, &defs(&[("asset_tag", "text")]))
            .unwrap_err();
        assert_eq!(core(err).kind(), "duplicate_category");
    }

    #[rstest]
    #[case::parent_dirs("../../escape")]
    #[case::slash("a/b")]
    #[case::backslash("a\\b")]
    #[case::nul("a\0b")]
    #[case::dot_dot("..")]
    fn names_that_escape_the_export_dir(#[case] name: &str) {
        let svc = test_service();
        let err = svc
            .create_category(name, &defs(&[("asset_tag", "text")]))
            .unwrap_err();
        assert_eq!(core(err).kind(), "invalid_field_list");
        assert!(svc.list_categories().is_empty());
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::repeated(&[("asset_tag", "text"), ("Asset Tag", "text")])]
    #[case::bad_type(&[("asset_tag", "text"), ("weight", "float")])]
    #[case::blank_name(&[("asset_tag", "text"), ("  ", "text")])]
    #[case::no_identifier(&[("serial", "text")])]
    fn invalid_field_lists(#[case] fields: &[(&str, &str)]) {
        let svc = test_service();
        let err = svc.create_category("printer", &defs(fields)).unwrap_err();
        assert_eq!(core(err).kind(), "invalid_field_list");
        assert!(svc.list_categories().is_empty());
    }

    #[test]
    fn add_fields_appends_in_order() {
        let svc = laptop_service();
        let schema = svc
            .add_fields("laptop", &defs(&[("purchased", "date"), ("Encrypted", "bool")]))
            .unwrap();
        assert_eq!(
            schema.field_names(),
            vec!["asset_tag", "asset_code", "ram", "purchased", "encrypted"]
        );
    }

    #[test]
    fn add_fields_is_all_or_nothing() {
        let svc = laptop_service();
        let err = svc
            .add_fields("laptop", &defs(&[("purchased", "date"), ("RAM", "int")]))
            .unwrap_err();
        assert_eq!(
            core(err),
            CoreError::FieldAlreadyExists {
                category: "laptop".into(),
                field: "ram".into()
            }
        );
        assert_eq!(svc.get_category("laptop").unwrap().fields.len(), 3);
    }

    #[test]
    fn add_fields_rejects_collision_within_batch() {
        let svc = laptop_service();
        let err = svc
            .add_fields("laptop", &defs(&[("colour", "text"), ("Colour", "text")]))
            .unwrap_err();
        assert_eq!(core(err).kind(), "field_already_exists");
    }

    #[test]
    fn add_fields_errors() {
        let svc = laptop_service();
        assert_eq!(
            core(svc.add_fields("printer", &defs(&[("x", "text")])).unwrap_err()).kind(),
            "unknown_category"
        );
        assert_eq!(
            core(svc.add_fields("laptop", &[]).unwrap_err()).kind(),
            "invalid_field_list"
        );
    }

    #[test]
    fn remove_field_rules() {
        let svc = laptop_service();
        assert_eq!(
            core(svc.remove_field("laptop", "colour").unwrap_err()).kind(),
            "unknown_field"
        );
        let schema = svc.remove_field("laptop", "Asset Code").unwrap();
        assert_eq!(schema.field_names(), vec!["asset_tag", "ram"]);
        assert_eq!(
            core(svc.remove_field("laptop", "asset_tag").unwrap_err()).kind(),
            "invalid_field_list"
        );
    }

    #[test]
    fn remove_category_then_unknown() {
        let svc = laptop_service();
        svc.remove_category("laptop").unwrap();
        assert!(svc.list_categories().is_empty());
        assert_eq!(
            core(svc.get_category("laptop").unwrap_err()).kind(),
            "unknown_category"
        );
        assert_eq!(
            core(svc.remove_category("laptop").unwrap_err()).kind(),
            "unknown_category"
        );
        // the name is free again
        assert!(
            svc.create_category("laptop", &defs(&[("asset_code", "text")]))
                .is_ok()
        );
    }

    #[test]
    fn listing_is_stable_and_ordered() {
        let svc = test_service();
        for name in ["printer", "laptop", "monitor"] {
            svc.create_category(name, &defs(&[("asset_tag", "text")]))
                .unwrap();
        }
        let first = svc.list_categories();
        let second = svc.list_categories();
        assert_eq!(first, second);
        let names: Vec<&str> = first.iter().map(|s| s.table_name.as_str()).collect();
        assert_eq!(names, vec!["printer", "laptop", "monitor"]);
    }
}
