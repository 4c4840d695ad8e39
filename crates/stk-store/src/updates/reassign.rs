//! Reassignment patch builder.

use std::collections::BTreeMap;

use serde::Serialize;
use stk_core::reserved::ReservedField;

/// Sparse patch applied by `AssetService::reassign`.
///
/// Keys are attribute names as submitted; values are raw text. Blank values
/// mean "leave unchanged" and are dropped during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReassignUpdate {
    pub fields: BTreeMap<String, String>,
}

impl ReassignUpdate {
    #[must_use]
    pub const fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<BTreeMap<String, String>> for ReassignUpdate {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self::new(fields)
    }
}

pub struct ReassignUpdateBuilder(ReassignUpdate);

impl ReassignUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ReassignUpdate::default())
    }

    /// Set any attribute, reserved or schema-declared.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.fields.insert(name.into(), value.into());
        self
    }

    /// Set a reserved metadata attribute.
    #[must_use]
    pub fn reserved(self, field: ReservedField, value: impl Into<String>) -> Self {
        self.field(field.as_str(), value)
    }

    #[must_use]
    pub fn user_name(self, value: impl Into<String>) -> Self {
        self.reserved(ReservedField::UserName, value)
    }

    #[must_use]
    pub fn user_id(self, value: impl Into<String>) -> Self {
        self.reserved(ReservedField::UserId, value)
    }

    #[must_use]
    pub fn email(self, value: impl Into<String>) -> Self {
        self.reserved(ReservedField::Email, value)
    }

    #[must_use]
    pub fn department(self, value: impl Into<String>) -> Self {
        self.reserved(ReservedField::Department, value)
    }

    #[must_use]
    pub fn location(self, value: impl Into<String>) -> Self {
        self.reserved(ReservedField::Location, value)
    }

    #[must_use]
    pub fn section(self, value: impl Into<String>) -> Self {
        self.reserved(ReservedField::Section, value)
    }

    #[must_use]
    pub fn date_of_return(self, value: impl Into<String>) -> Self {
        self.reserved(ReservedField::DateOfReturn, value)
    }

    #[must_use]
    pub fn date_of_reassign(self, value: impl Into<String>) -> Self {
        self.reserved(ReservedField::DateOfReassign, value)
    }

    #[must_use]
    pub fn date_of_update(self, value: impl Into<String>) -> Self {
        self.reserved(ReservedField::DateOfUpdate, value)
    }

    #[must_use]
    pub fn remarks(self, value: impl Into<String>) -> Self {
        self.reserved(ReservedField::Remarks, value)
    }

    #[must_use]
    pub fn build(self) -> ReassignUpdate {
        self.0
    }
}

impl Default for ReassignUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
