//! JSON responses and the error-to-status mapping.

use serde::Serialize;
use serde_json::Value;
use stk_core::errors::CoreError;
use stk_core::responses::ErrorBody;
use stk_schema::SchemaError;
use stk_store::StoreError;
use tracing::error;

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// 200 with `value` as the body.
    pub fn ok<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self { status: 200, body },
            Err(e) => {
                error!(error = %e, "response serialization failed");
                Self::error(500, "storage_error", "response could not be encoded")
            }
        }
    }

    /// An `{error, detail}` body.
    #[must_use]
    pub fn error(status: u16, kind: &str, detail: &str) -> Self {
        let body = ErrorBody {
            error: kind.to_string(),
            detail: detail.to_string(),
        };
        Self {
            status,
            body: serde_json::to_value(&body).unwrap_or(Value::Null),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status < 400
    }
}

const fn core_status(err: &CoreError) -> u16 {
    match err {
        CoreError::DuplicateCategory { .. } | CoreError::FieldAlreadyExists { .. } => 409,
        CoreError::UnknownCategory { .. }
        | CoreError::UnknownField { .. }
        | CoreError::NotFound { .. } => 404,
        CoreError::InvalidFieldList(_) | CoreError::Validation { .. } => 400,
    }
}

impl From<StoreError> for ApiResponse {
    fn from(err: StoreError) -> Self {
        match err.as_core() {
            Some(core) => Self::error(core_status(core), core.kind(), &core.to_string()),
            None => {
                error!(error = %err, "storage failure");
                Self::error(500, err.kind(), &err.to_string())
            }
        }
    }
}

impl From<SchemaError> for ApiResponse {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::ValidationFailed { errors } => {
                Self::error(400, "invalid_request", &errors.join("; "))
            }
            other => {
                error!(error = %other, "schema registry failure");
                Self::error(500, "schema_error", &other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(CoreError::DuplicateCategory { name: "laptop".into() }, 409)]
    #[case(CoreError::FieldAlreadyExists { category: "laptop".into(), field: "ram".into() }, 409)]
    #[case(CoreError::unknown_category("printer"), 404)]
    #[case(CoreError::UnknownField { category: "laptop".into(), field: "gpu".into() }, 404)]
    #[case(CoreError::NotFound { category: "laptop".into(), identifier: "LT9".into() }, 404)]
    #[case(CoreError::InvalidFieldList("no fields given".into()), 400)]
    #[case(CoreError::Validation { category: "laptop".into(), problems: vec!["x".into()] }, 400)]
    fn core_errors_map_to_status(#[case] err: CoreError, #[case] status: u16) {
        let kind = err.kind();
        let response = ApiResponse::from(StoreError::from(err));
        assert_eq!(response.status, status);
        assert_eq!(response.body["error"], kind);
    }

    #[test]
    fn storage_failures_are_500() {
        let response = ApiResponse::from(StoreError::from(std::io::Error::other("disk full")));
        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "storage_error");
    }

    #[test]
    fn error_body_shape() {
        let response = ApiResponse::error(401, "unauthorized", "missing bearer token");
        assert_eq!(
            response.body,
            json!({"error": "unauthorized", "detail": "missing bearer token"})
        );
        assert!(!response.is_success());
    }
}
