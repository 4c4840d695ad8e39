//! Reserved reassignment metadata.
//!
//! These attributes may be attached to a record of any category without being
//! declared in its schema, and are never required when a record is created.

use std::fmt;

use crate::field::FieldType;

/// Custodianship metadata carried by every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedField {
    UserName,
    UserId,
    Email,
    Department,
    Location,
    Section,
    DateOfReturn,
    DateOfReassign,
    DateOfUpdate,
    Remarks,
}

impl ReservedField {
    /// All reserved fields, in canonical (export) order.
    pub const ALL: [Self; 10] = [
        Self::UserName,
        Self::UserId,
        Self::Email,
        Self::Department,
        Self::Location,
        Self::Section,
        Self::DateOfReturn,
        Self::DateOfReassign,
        Self::DateOfUpdate,
        Self::Remarks,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserName => "user_name",
            Self::UserId => "user_id",
            Self::Email => "email",
            Self::Department => "department",
            Self::Location => "location",
            Self::Section => "section",
            Self::DateOfReturn => "date_of_return",
            Self::DateOfReassign => "date_of_reassign",
            Self::DateOfUpdate => "date_of_update",
            Self::Remarks => "remarks",
        }
    }

    #[must_use]
    pub const fn field_type(self) -> FieldType {
        match self {
            Self::DateOfReturn | Self::DateOfReassign | Self::DateOfUpdate => FieldType::Date,
            _ => FieldType::Text,
        }
    }

    /// Look up a reserved field by its (already normalized) name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for ReservedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `name` is reserved metadata.
#[must_use]
pub fn is_reserved_field(name: &str) -> bool {
    ReservedField::from_name(name).is_some()
}
