//! Bearer tokens accepted by the HTTP transport.

use serde::{Deserialize, Serialize};
use stk_core::identity::Role;

/// A caller allowed to use the transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserEntry {
    pub name: String,
    pub token: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

const fn default_role() -> Role {
    Role::User
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

impl AuthConfig {
    /// At least one caller can authenticate.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.users.iter().any(|u| !u.token.is_empty())
    }

    /// Find the user presenting `token`.
    #[must_use]
    pub fn user_for_token(&self, token: &str) -> Option<&UserEntry> {
        if token.is_empty() {
            return None;
        }
        self.users.iter().find(|u| u.token == token)
    }
}
