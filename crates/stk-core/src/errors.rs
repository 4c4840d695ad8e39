//! Cross-cutting error types for Stockroom.
//!
//! `CoreError` is the taxonomy every schema or record operation reports.
//! Storage-specific failures (`StoreError`) and transport failures are defined
//! in their own crates and wrap this one.

use thiserror::Error;

/// Recoverable failures of catalog and record operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The category already exists, or the name is reserved.
    #[error("Category already exists: {name}")]
    DuplicateCategory { name: String },

    /// No category with this name.
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    /// The category has no field with this name.
    #[error("Unknown field '{field}' in category '{category}'")]
    UnknownField { category: String, field: String },

    /// A proposed field list is unusable (empty, duplicate, bad type, ...).
    #[error("Invalid field list: {0}")]
    InvalidFieldList(String),

    /// A field being added collides with an existing one.
    #[error("Field '{field}' already exists in category '{category}'")]
    FieldAlreadyExists { category: String, field: String },

    /// Attributes failed validation against the category schema.
    #[error("Validation failed for '{category}': {}", problems.join("; "))]
    Validation {
        category: String,
        problems: Vec<String>,
    },

    /// Identifier resolution found no record.
    #[error("Asset not found in '{category}' with identifier '{identifier}'")]
    NotFound {
        category: String,
        identifier: String,
    },
}

impl CoreError {
    /// Stable machine-readable name of the error variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateCategory { .. } => "duplicate_category",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::UnknownField { .. } => "unknown_field",
            Self::InvalidFieldList(_) => "invalid_field_list",
            Self::FieldAlreadyExists { .. } => "field_already_exists",
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
        }
    }

    /// Shorthand for [`CoreError::UnknownCategory`].
    #[must_use]
    pub fn unknown_category(name: &str) -> Self {
        Self::UnknownCategory {
            name: name.to_string(),
        }
    }
}
