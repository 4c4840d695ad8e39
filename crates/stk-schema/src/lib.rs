//! # stk-schema
//!
//! JSON Schema registry for Stockroom.
//!
//! Request, response, entity, and trail types are defined in `stk-core` with
//! `#[derive(JsonSchema)]`. This crate compiles their schemas once and
//! validates raw JSON against them, so the transport can reject malformed
//! bodies with a readable list of problems before deserializing.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
