use std::collections::BTreeMap;

use anyhow::{Context, bail};
use stk_core::requests::FieldDefinition;

/// Parse `--field name:type` values. Type names are checked by the catalog.
pub fn parse_field_specs(raw: &[String]) -> anyhow::Result<Vec<FieldDefinition>> {
    raw.iter()
        .map(|spec| {
            let (name, field_type) = spec
                .split_once(':')
                .with_context(|| format!("invalid field '{spec}': expected name:type"))?;
            Ok(FieldDefinition::new(name, field_type))
        })
        .collect()
}

/// Parse `--set key=value` values. The value may be empty or contain `=`.
pub fn parse_assignments(raw: &[String]) -> anyhow::Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for pair in raw {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("invalid assignment '{pair}': expected key=value"))?;
        if out.insert(key.to_string(), value.to_string()).is_some() {
            bail!("'{key}' is set more than once");
        }
    }
    Ok(out)
}
