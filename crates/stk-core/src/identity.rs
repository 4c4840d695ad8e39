use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Role attached to an authenticated caller by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity storage as seen by the core: only the dashboard's user count.
///
/// Implemented by whatever owns user accounts (the transport's token table in
/// `stk-server`); the core never inspects identities itself.
pub trait UserDirectory: Send + Sync {
    fn user_count(&self) -> usize;
}

/// Directory used when no identity storage is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUsers;

impl UserDirectory for NoUsers {
    fn user_count(&self) -> usize {
        0
    }
}
