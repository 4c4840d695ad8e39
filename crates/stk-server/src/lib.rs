//! # stk-server
//!
//! HTTP transport for the asset catalog.
//!
//! [`Router`] maps a decoded request to an [`ApiResponse`] and is free of any
//! socket handling, so it can be driven directly from tests. [`HttpServer`]
//! feeds it from a `tiny_http` listener on a fixed pool of worker threads.
//!
//! Every route requires `Authorization: Bearer <token>` for a configured
//! admin. The core never sees identities; the token table is also the
//! dashboard's user directory.

mod auth;
mod error;
mod http;
mod query;
mod response;
mod router;

pub use auth::TokenTable;
pub use error::ServerError;
pub use http::{HttpServer, ShutdownHandle};
pub use response::ApiResponse;
pub use router::{ApiRequest, Router};
