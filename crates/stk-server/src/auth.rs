//! Bearer-token capability check.

use stk_config::{AuthConfig, UserEntry};
use stk_core::identity::{Role, UserDirectory};
use tracing::warn;

use crate::response::ApiResponse;

/// Configured callers, looked up by token.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    users: Vec<UserEntry>,
}

impl TokenTable {
    #[must_use]
    pub fn new(users: Vec<UserEntry>) -> Self {
        Self { users }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.users.clone())
    }

    /// Resolve the `Authorization` header to an admin.
    ///
    /// 401 for a missing, malformed, or unknown token; 403 for a known caller
    /// without the admin role.
    pub(crate) fn authorize(&self, header: Option<&str>) -> Result<&UserEntry, ApiResponse> {
        let token = header
            .and_then(|value| value.trim().strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiResponse::error(401, "unauthorized", "missing bearer token")
            })?;

        let user = self
            .users
            .iter()
            .find(|user| !user.token.is_empty() && user.token == token)
            .ok_or_else(|| {
                warn!("rejected unknown token");
                ApiResponse::error(401, "unauthorized", "unknown token")
            })?;

        if user.role != Role::Admin {
            warn!(user = %user.name, role = %user.role, "rejected non-admin caller");
            return Err(ApiResponse::error(
                403,
                "forbidden",
                &format!("user '{}' is not an admin", user.name),
            ));
        }
        Ok(user)
    }
}

impl UserDirectory for TokenTable {
    fn user_count(&self) -> usize {
        self.users.len()
    }
}
