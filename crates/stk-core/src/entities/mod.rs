//! Category schemas and the records stored against them.
//!
//! Both derive `Serialize` and `JsonSchema` so they can be returned across the
//! transport boundary and registered in the schema registry.

mod record;
mod schema;

pub use record::AssetRecord;
pub use schema::CategorySchema;
