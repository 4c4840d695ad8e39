//! Tabular projection of categories for export.

use stk_core::names::normalize_category_name;
use stk_core::reserved::ReservedField;
use stk_core::responses::{ExportSheet, Workbook};

use crate::catalog::CategoryState;
use crate::error::StoreError;
use crate::service::AssetService;

/// Schema fields in order, then reserved metadata present on any record in
/// canonical order, skipping names the schema already declares.
fn headers(state: &CategoryState) -> Vec<String> {
    let mut headers: Vec<String> = state
        .schema
        .field_names()
        .into_iter()
        .map(String::from)
        .collect();
    for reserved in ReservedField::ALL {
        let name = reserved.as_str();
        if !state.schema.has_field(name) && state.records.iter().any(|r| r.get(name).is_some()) {
            headers.push(name.to_string());
        }
    }
    headers
}

fn sheet(state: &CategoryState) -> ExportSheet {
    let headers = headers(state);
    let rows = state
        .records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|h| record.get(h).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();
    ExportSheet {
        name: state.schema.table_name.clone(),
        headers,
        rows,
    }
}

impl AssetService {
    /// Flatten one category into a sheet.
    ///
    /// # Errors
    ///
    /// `UnknownCategory`, including for the reserved pseudo-category names.
    pub fn export_table(&self, table: &str) -> Result<ExportSheet, StoreError> {
        let table = normalize_category_name(table);
        let slot = self.catalog().slot(&table)?;
        let state = slot.read()?;
        Ok(sheet(&state))
    }

    /// One sheet per category in catalog order.
    #[must_use]
    pub fn export_all(&self) -> Workbook {
        let sheets = self
            .catalog()
            .slots()
            .iter()
            .filter_map(|slot| slot.read().ok().map(|state| sheet(&state)))
            .collect();
        Workbook { sheets }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{defs, laptop_service, raw};
    use crate::updates::reassign::ReassignUpdateBuilder;

    use super::*;

    #[test]
    fn headers_follow_schema_then_reserved_in_use() {
        let svc = laptop_service();
        svc.add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "C-1"), ("ram", "16")]))
            .unwrap();
        svc.add_asset(
            "laptop",
            &raw(&[
                ("asset_tag", "LT02"),
                ("asset_code", "C-2"),
                ("ram", "8"),
                ("remarks", "spare"),
                ("user_name", "Dana"),
            ]),
        )
        .unwrap();

        let sheet = svc.export_table("laptop").unwrap();
        assert_eq!(sheet.name, "laptop");
        assert_eq!(
            sheet.headers,
            vec!["asset_tag", "asset_code", "ram", "user_name", "remarks"]
        );
        assert_eq!(
            sheet.rows,
            vec![
                vec!["LT01", "C-1", "16", "", ""],
                vec!["LT02", "C-2", "8", "Dana", "spare"],
            ]
        );
    }

    #[test]
    fn declared_reserved_field_is_not_repeated() {
        let svc = laptop_service();
        svc.add_fields("laptop", &defs(&[("remarks", "text")])).unwrap();
        svc.add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "C-1"), ("ram", "16")]))
            .unwrap();
        svc.reassign("laptop", "LT01", &ReassignUpdateBuilder::new().remarks("x").build())
            .unwrap();
        let sheet = svc.export_table("laptop").unwrap();
        assert_eq!(sheet.headers, vec!["asset_tag", "asset_code", "ram", "remarks"]);
        assert_eq!(sheet.rows[0][3], "x");
    }

    #[test]
    fn removed_field_is_not_exported() {
        let svc = laptop_service();
        svc.add_asset("laptop", &raw(&[("asset_tag", "LT01"), ("asset_code", "C-1"), ("ram", "16")]))
            .unwrap();
        svc.remove_field("laptop", "ram").unwrap();
        let sheet = svc.export_table("laptop").unwrap();
        assert_eq!(sheet.headers, vec!["asset_tag", "asset_code"]);
        assert_eq!(sheet.rows, vec![vec!["LT01", "C-1"]]);
    }

    #[test]
    fn reserved_pseudo_categories_are_unknown() {
        let svc = laptop_service();
        for name in ["users", "category_info", "printer"] {
            assert_eq!(svc.export_table(name).unwrap_err().kind(), "unknown_category");
        }
    }

    #[test]
    fn export_all_follows_catalog_order() {
        let svc = laptop_service();
        svc.create_category("printer", &defs(&[("asset_code", "text")]))
            .unwrap();
        let book = svc.export_all();
        let names: Vec<&str> = book.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["laptop", "printer"]);
        assert!(book.sheets[1].rows.is_empty());
    }
}
