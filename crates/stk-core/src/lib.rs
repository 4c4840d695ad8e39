//! # stk-core
//!
//! Core types and error taxonomy for Stockroom.
//!
//! This crate provides the foundational types shared across all Stockroom crates:
//! - Field types, validated field values, and name normalization
//! - Category schemas and asset records
//! - Reserved reassignment metadata
//! - Cross-cutting error types
//! - Trail operation envelope for JSONL persistence
//! - Boundary request and response types
//! - The identity-storage seam used by the dashboard

pub mod entities;
pub mod errors;
pub mod field;
pub mod identity;
pub mod names;
pub mod requests;
pub mod reserved;
pub mod responses;
pub mod trail;
