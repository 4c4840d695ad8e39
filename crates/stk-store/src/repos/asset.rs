//! Asset repository: insert, identifier lookup, reassignment, delete.

use std::collections::BTreeMap;

use stk_core::entities::AssetRecord;
use stk_core::errors::CoreError;
use stk_core::names::normalize_category_name;
use stk_core::trail::{AssetPayload, IdentifierPayload, ReassignPayload, TrailOp};
use tracing::debug;

use crate::error::StoreError;
use crate::service::AssetService;
use crate::updates::reassign::ReassignUpdate;
use crate::validate;

fn not_found(table: &str, identifier: &str) -> CoreError {
    CoreError::NotFound {
        category: table.to_string(),
        identifier: identifier.to_string(),
    }
}

impl AssetService {
    /// Validate and append a record. Identifiers are not checked for
    /// uniqueness.
    ///
    /// # Errors
    ///
    /// `UnknownCategory`; `Validation` listing every problem found.
    pub fn add_asset(
        &self,
        table: &str,
        attributes: &BTreeMap<String, String>,
    ) -> Result<AssetRecord, StoreError> {
        let table = normalize_category_name(table);
        let slot = self.catalog().slot(&table)?;
        let mut state = slot.write()?;

        let values = validate::new_record(&state.schema, attributes)?;
        let record = AssetRecord::new(&table, values);

        self.record(
            TrailOp::AddAsset,
            &table,
            &AssetPayload {
                attributes: record.flatten(),
            },
        )?;

        state.records.push(record.clone());
        debug!(table = %table, records = state.records.len(), "asset added");
        Ok(record)
    }

    /// Records whose first identifier field equals `identifier`, or failing
    /// that the second. An empty result is not an error.
    ///
    /// # Errors
    ///
    /// `UnknownCategory`.
    pub fn search(&self, table: &str, identifier: &str) -> Result<Vec<AssetRecord>, StoreError> {
        let table = normalize_category_name(table);
        let slot = self.catalog().slot(&table)?;
        let state = slot.read()?;

        let hits: Vec<AssetRecord> = state
            .matching(identifier)
            .into_iter()
            .map(|record| record.project(&state.schema))
            .collect();
        debug!(table = %table, identifier, hits = hits.len(), "search");
        Ok(hits)
    }

    /// Merge a sparse patch into the first record matching `identifier`.
    ///
    /// A patch that is empty once blanks are dropped leaves the record (and
    /// the trail) untouched.
    ///
    /// # Errors
    ///
    /// `UnknownCategory`; `NotFound`; `Validation` for keys the category does
    /// not accept or values that fail their type.
    pub fn reassign(
        &self,
        table: &str,
        identifier: &str,
        update: &ReassignUpdate,
    ) -> Result<AssetRecord, StoreError> {
        let table = normalize_category_name(table);
        let slot = self.catalog().slot(&table)?;
        let mut guard = slot.write()?;
        let state = &mut *guard;

        let pos = state
            .position(identifier)
            .ok_or_else(|| not_found(&table, identifier))?;
        let patch = validate::patch(&state.schema, &update.fields)?;

        if patch.is_empty() {
            debug!(table = %table, identifier, "empty reassignment");
            return Ok(state.records[pos].project(&state.schema));
        }

        self.record(
            TrailOp::Reassign,
            &table,
            &ReassignPayload {
                identifier: identifier.to_string(),
                patch: patch
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_string()))
                    .collect(),
            },
        )?;

        let record = &mut state.records[pos];
        let changed = patch.len();
        record.attributes.extend(patch);
        debug!(table = %table, identifier, changed, "asset reassigned");
        Ok(record.project(&state.schema))
    }

    /// Remove the first record matching `identifier` and return it.
    ///
    /// # Errors
    ///
    /// `UnknownCategory`; `NotFound`.
    pub fn delete_asset(&self, table: &str, identifier: &str) -> Result<AssetRecord, StoreError> {
        let table = normalize_category_name(table);
        let slot = self.catalog().slot(&table)?;
        let mut state = slot.write()?;

        let pos = state
            .position(identifier)
            .ok_or_else(|| not_found(&table, identifier))?;

        self.record(
            TrailOp::DeleteAsset,
            &table,
            &IdentifierPayload {
                identifier: identifier.to_string(),
            },
        )?;

        let removed = state.records.remove(pos);
        debug!(table = %table, identifier, "asset deleted");
        Ok(removed.project(&state.schema))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stk_core::field::FieldValue;

    use crate::test_support::helpers::{defs, laptop_service, raw, test_service};
    use crate::updates::reassign::ReassignUpdateBuilder;

    use super::*;

    fn kind(err: &StoreError) -> &'static str {
        err.kind()
    }

    #[test]
    fn add_then_search_round_trips() {
        let svc = laptop_service();
        let data = raw(&[("asset_tag", "LT01"), ("asset_code", "C-9"), ("ram", "16")]);
        let added = svc.add_asset("laptop", &data).unwrap();
        let found = svc.search("laptop", "LT01").unwrap();
        assert_eq!(found, vec![added.clone()]);
        assert_eq!(found[0].flatten(), data);
    }

    #[test]
    fn key_outside_schema_is_rejected() {
        let svc = laptop_service();
        let err = svc
            .add_asset(
                "laptop",
                &raw(&[("asset_tag", "LT01"), ("asset_code", "C-9"), ("ram", "16"), ("gpu", "x")]),
            )
            .unwrap_err();
        assert_eq!(kind(&err), "validation_error");
        assert!(svc.search("laptop", "LT01").unwrap().is_empty());
    }

    #[test]
    fn unknown_table() {
        let svc = laptop_service();
        let err = svc.add_asset("printer", &raw(&[("asset_tag", "P1")])).unwrap_err();
        assert_eq!(kind(&err), "unknown_category");
        assert_eq!(kind(&svc.search("printer", "P1").unwrap_err()), "unknown_category");
    }

    #[test]
    fn search_falls_back_to_second_identifier() {
        let svc = laptop_service();
        svc.add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "C-9"), ("ram", "8")]))
            .unwrap();
        let hits = svc.search("laptop", "C-9").unwrap();
        assert_eq!(hits.len(), 1);
        assert!(svc.search("laptop", "nothing").unwrap().is_empty());
    }

    #[test]
    fn duplicates_coexist_and_first_wins() {
        let svc = laptop_service();
        svc.add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "A"), ("ram", "8")]))
            .unwrap();
        svc.add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "B"), ("ram", "8")]))
            .unwrap();
        assert_eq!(svc.search("laptop", "LT01").unwrap().len(), 2);

        let updated = svc
            .reassign("laptop", "LT01", &ReassignUpdateBuilder::new().remarks("first").build())
            .unwrap();
        assert_eq!(updated.get("asset_code"), Some(&FieldValue::Text("A".into())));

        let removed = svc.delete_asset("laptop", "LT01").unwrap();
        assert_eq!(removed.get("asset_code"), Some(&FieldValue::Text("A".into())));
        let left = svc.search("laptop", "LT01").unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].get("asset_code"), Some(&FieldValue::Text("B".into())));
        assert!(left[0].get("remarks").is_none());
    }

    #[test]
    fn reassign_changes_only_patched_keys() {
        let svc = laptop_service();
        let before = svc
            .add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "C-9"), ("ram", "16")]))
            .unwrap();
        let after = svc
            .reassign("laptop", "LT01", &ReassignUpdateBuilder::new().remarks("x").build())
            .unwrap();

        let mut expected = before.attributes;
        expected.insert("remarks".into(), FieldValue::Text("x".into()));
        assert_eq!(after.attributes, expected);
    }

    #[test]
    fn reassign_drops_blanks_and_accepts_schema_fields() {
        let svc = laptop_service();
        svc.add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "C-9"), ("ram", "16")]))
            .unwrap();
        let update = ReassignUpdateBuilder::new()
            .user_name("")
            .field("RAM", "32")
            .date_of_reassign("2026-02-01")
            .build();
        let after = svc.reassign("laptop", "LT01", &update).unwrap();
        assert_eq!(after.get("ram"), Some(&FieldValue::Integer(32)));
        assert!(after.get("user_name").is_none());
        assert_eq!(after.get("date_of_reassign").unwrap().to_string(), "2026-02-01");
    }

    #[test]
    fn empty_patch_returns_record_unchanged() {
        let svc = laptop_service();
        let before = svc
            .add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "C-9"), ("ram", "16")]))
            .unwrap();
        let update = ReassignUpdateBuilder::new().remarks("  ").build();
        assert_eq!(svc.reassign("laptop", "LT01", &update).unwrap(), before);
    }

    #[test]
    fn reassign_errors() {
        let svc = laptop_service();
        svc.add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "C-9"), ("ram", "16")]))
            .unwrap();
        let remarks = ReassignUpdateBuilder::new().remarks("x").build();
        assert_eq!(kind(&svc.reassign("laptop", "LT99", &remarks).unwrap_err()), "not_found");
        assert_eq!(kind(&svc.reassign("printer", "LT01", &remarks).unwrap_err()), "unknown_category");

        let bad = ReassignUpdateBuilder::new().field("owner", "x").build();
        assert_eq!(kind(&svc.reassign("laptop", "LT01", &bad).unwrap_err()), "validation_error");
        let bad_date = ReassignUpdateBuilder::new().date_of_return("soon").build();
        assert_eq!(
            kind(&svc.reassign("laptop", "LT01", &bad_date).unwrap_err()),
            "validation_error"
        );
    }

    #[test]
    fn delete_missing_is_not_found() {
        let svc = laptop_service();
        assert_eq!(kind(&svc.delete_asset("laptop", "LT01").unwrap_err()), "not_found");
    }

    #[test]
    fn removed_field_is_hidden_not_scrubbed() {
        let svc = laptop_service();
        svc.add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "C-9"), ("ram", "16")]))
            .unwrap();
        svc.remove_field("laptop", "ram").unwrap();
        let hit = &svc.search("laptop", "LT01").unwrap()[0];
        assert!(hit.get("ram").is_none());

        // re-adding the field surfaces the stored value again
        svc.add_fields("laptop", &defs(&[("ram", "integer")])).unwrap();
        let hit = &svc.search("laptop", "LT01").unwrap()[0];
        assert_eq!(hit.get("ram"), Some(&FieldValue::Integer(16)));
    }

    #[test]
    fn new_field_is_not_back_filled() {
        let svc = laptop_service();
        svc.add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "C-9"), ("ram", "16")]))
            .unwrap();
        svc.add_fields("laptop", &defs(&[("purchased", "date")])).unwrap();
        let hit = &svc.search("laptop", "LT01").unwrap()[0];
        assert!(hit.get("purchased").is_none());
        // and the new field is now required for new records
        let err = svc
            .add_asset("laptop", &raw(&[("asset_tag", "LT02"), ("asset_code", "C-2"), ("ram", "8")]))
            .unwrap_err();
        assert_eq!(kind(&err), "validation_error");
    }

    #[test]
    fn identifiers_are_read_as_their_field_type() {
        let svc = test_service();
        svc.create_category("switch", &defs(&[("asset_tag", "integer"), ("asset_code", "text")]))
            .unwrap();
        let added = svc
            .add_asset("switch", &raw(&[("asset_tag", "007"), ("asset_code", "S-1")]))
            .unwrap();
        assert_eq!(added.get("asset_tag"), Some(&FieldValue::Integer(7)));

        for identifier in ["007", "7", "+7", " 7"] {
            assert_eq!(svc.search("switch", identifier).unwrap(), vec![added.clone()], "{identifier}");
        }
        assert!(svc.search("switch", "8").unwrap().is_empty());

        let remarks = ReassignUpdateBuilder::new().remarks("rack 2").build();
        let updated = svc.reassign("switch", "007", &remarks).unwrap();
        assert_eq!(updated.get("remarks"), Some(&FieldValue::Text("rack 2".into())));
        svc.delete_asset("switch", "007").unwrap();
        assert!(svc.search("switch", "7").unwrap().is_empty());
    }

    #[test]
    fn text_values_are_stored_trimmed() {
        let svc = laptop_service();
        let added = svc
            .add_asset("laptop", &raw(&[("asset_tag", " LT01 "), ("asset_code", "C-9\t"), ("ram", "16")]))
            .unwrap();
        assert_eq!(added.get("asset_tag"), Some(&FieldValue::Text("LT01".into())));
        assert_eq!(added.get("asset_code"), Some(&FieldValue::Text("C-9".into())));
        assert_eq!(svc.search("laptop", "LT01").unwrap(), vec![added.clone()]);
        assert_eq!(svc.search("laptop", " LT01 ").unwrap(), vec![added]);
    }
}
