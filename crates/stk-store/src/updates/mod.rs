//! Update builder types for record mutations.
//!
//! The builder output holds only the keys the caller set. After validation
//! it is serialized as the trail `patch` payload.

pub mod reassign;
