//! Field types, field specs, and validated field values.

use std::fmt;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::CoreError;
use crate::names::normalize_field_name;
use crate::requests::FieldDefinition;

/// Storage format of [`FieldValue::Date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// The fixed set of field types a schema may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Integer,
    Date,
    Boolean,
}

impl FieldType {
    /// Parse a type name as submitted by clients.
    ///
    /// Case-insensitive; accepts `string`, `int`, and `bool` as aliases.
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "string" => Some(Self::Text),
            "integer" | "int" => Some(Self::Integer),
            "date" => Some(Self::Date),
            "boolean" | "bool" => Some(Self::Boolean),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::Boolean => "boolean",
        }
    }

    /// Validate `raw` as a value of this type. Surrounding whitespace is
    /// never part of a value, text included.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when `raw` does not parse.
    pub fn parse_value(self, raw: &str) -> Result<FieldValue, String> {
        let trimmed = raw.trim();
        match self {
            Self::Text => Ok(FieldValue::Text(trimmed.to_string())),
            Self::Integer => trimmed
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| format!("'{raw}' is not an integer")),
            Self::Date => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .map(FieldValue::Date)
                .map_err(|_| format!("'{raw}' is not a date (expected YYYY-MM-DD)")),
            Self::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(FieldValue::Boolean(true)),
                "false" | "no" | "0" => Ok(FieldValue::Boolean(false)),
                _ => Err(format!("'{raw}' is not a boolean")),
            },
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldSpec
// ---------------------------------------------------------------------------

/// One named, typed attribute of a category schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: normalize_field_name(name),
            field_type,
        }
    }

    /// Build a spec from a client definition, normalizing the name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFieldList` for an empty name or an
    /// unrecognized type.
    pub fn from_definition(def: &FieldDefinition) -> Result<Self, CoreError> {
        let name = normalize_field_name(&def.name);
        if name.is_empty() {
            return Err(CoreError::InvalidFieldList("field name is empty".into()));
        }
        let field_type = FieldType::from_name(&def.field_type).ok_or_else(|| {
            CoreError::InvalidFieldList(format!(
                "field '{name}' has unrecognized type '{}'",
                def.field_type
            ))
        })?;
        Ok(Self { name, field_type })
    }
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A value that passed validation for its field type.
///
/// Serializes as its canonical text, the same form it displays in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    Boolean(bool),
}

impl FieldValue {
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::Text(_) => FieldType::Text,
            Self::Integer(_) => FieldType::Integer,
            Self::Date(_) => FieldType::Date,
            Self::Boolean(_) => FieldType::Boolean,
        }
    }

    /// Whether the value counts as "not provided".
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
