use serde::Serialize;
use serde_json::Value;
use stk_core::responses::ExportSheet;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print export sheets. Tables keep each sheet's own column order.
pub fn output_sheets(sheets: &[ExportSheet], format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(&sheets, format);
    }
    let blocks = sheets
        .iter()
        .map(|sheet| {
            let headers = sheet.headers.iter().map(String::as_str).collect::<Vec<_>>();
            let body = if sheet.rows.is_empty() {
                String::from("(no rows)")
            } else {
                table::render_table(&headers, &sheet.rows, options())
            };
            format!("[{}]\n{body}", sheet.name)
        })
        .collect::<Vec<_>>();
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

fn options() -> table::TableOptions {
    table::TableOptions {
        max_width: ui::prefs().term_width,
    }
}

fn render_value_table(value: &Value) -> anyhow::Result<String> {
    match value {
        Value::Array(items) => Ok(render_array_table(items)),
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render_table(&["key", "value"], &rows, options()))
        }
        scalar => Ok(table::render_table(
            &["value"],
            &[vec![value_to_cell(scalar)]],
            options(),
        )),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers.sort();

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use stk_core::responses::DashboardStats;

    use super::render;
    use crate::cli::OutputFormat;

    fn stats() -> DashboardStats {
        DashboardStats {
            category_count: 1,
            asset_count: 2,
            user_count: 0,
            asset_counts_by_category: BTreeMap::from([("laptop".to_string(), 2)]),
            active_asset_counts_by_category: BTreeMap::from([("laptop".to_string(), 1)]),
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&stats(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["asset_count"], 2);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&stats(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let out = render(&stats(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("category_count"));
        assert!(out.contains(r#"{"laptop":1}"#));
    }

    #[test]
    fn table_render_for_records_unions_columns() {
        let records = serde_json::json!([
            {"asset_tag": "LT01", "ram": 16},
            {"asset_tag": "LT02", "remarks": "spare"},
        ]);
        let out = render(&records, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().unwrap_or_default();
        assert!(header.contains("asset_tag"));
        assert!(header.contains("ram"));
        assert!(header.contains("remarks"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let out = render(&Vec::<u32>::new(), OutputFormat::Table).expect("render");
        assert_eq!(out, "(no rows)");
    }
}
