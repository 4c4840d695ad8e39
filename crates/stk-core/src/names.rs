//! Name normalization and reserved names.
//!
//! Field names are case-folded and whitespace becomes `_`, so `"Asset Tag"`
//! and `asset_tag` denote the same field. Category names only get whitespace
//! folded; their case is preserved and significant.

/// Names that denote catalog and identity storage, never asset categories.
pub const RESERVED_CATEGORY_NAMES: [&str; 2] = ["category_info", "users"];

/// Field holding the asset tag.
pub const ASSET_TAG: &str = "asset_tag";

/// Field holding the asset code.
pub const ASSET_CODE: &str = "asset_code";

/// Fields used for identifier lookup.
pub const IDENTIFYING_FIELDS: [&str; 2] = [ASSET_TAG, ASSET_CODE];

/// Normalize a field name: trim, lowercase, whitespace runs to `_`.
#[must_use]
pub fn normalize_field_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Normalize a category name: trim and fold whitespace runs to `_`.
#[must_use]
pub fn normalize_category_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Whether `name` is one of [`RESERVED_CATEGORY_NAMES`].
#[must_use]
pub fn is_reserved_category(name: &str) -> bool {
    RESERVED_CATEGORY_NAMES.contains(&name)
}

/// Whether `name` can be used as a file name on export: no path
/// separators, no `..`, no control characters.
#[must_use]
pub fn is_path_safe_category(name: &str) -> bool {
    !name.contains(['/', '\\'])
        && !name.contains("..")
        && !name.chars().any(char::is_control)
}

/// Whether `name` is an identifying field.
#[must_use]
pub fn is_identifying_field(name: &str) -> bool {
    IDENTIFYING_FIELDS.contains(&name)
}
