//! Route table: decoded request in, JSON response out.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use stk_core::entities::AssetRecord;
use stk_core::errors::CoreError;
use stk_core::requests::{
    AssetInput, CategoryDeleteRequest, CategoryFieldsRequest, FieldDeleteRequest,
    ReassignRequest, attributes_from_json,
};
use stk_core::responses::{Ack, Workbook};
use stk_schema::SchemaRegistry;
use stk_store::{AssetService, ReassignUpdate, StoreError};
use tracing::debug;

use crate::auth::TokenTable;
use crate::error::ServerError;
use crate::query::Query;
use crate::response::ApiResponse;

/// A request as seen by the router, independent of the listener.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn bearer(mut self, token: &str) -> Self {
        self.authorization = Some(format!("Bearer {token}"));
        self
    }

    #[must_use]
    pub fn json(mut self, body: &Value) -> Self {
        self.body = body.to_string();
        self
    }

    #[must_use]
    pub fn text(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }
}

const ROUTES: [(&str, &str); 13] = [
    ("GET", "/categories"),
    ("POST", "/category"),
    ("POST", "/category/fields"),
    ("POST", "/category/field/delete"),
    ("POST", "/category/delete"),
    ("POST", "/asset"),
    ("GET", "/asset/search"),
    ("PUT", "/asset/reassign"),
    ("DELETE", "/asset"),
    ("GET", "/dashboard-stats"),
    ("GET", "/export"),
    ("GET", "/export-all"),
    ("POST", "/import"),
];

type Routed = Result<ApiResponse, ApiResponse>;

/// Dispatches requests to the asset service.
pub struct Router {
    service: Arc<AssetService>,
    tokens: Arc<TokenTable>,
    schemas: SchemaRegistry,
}

impl Router {
    /// # Errors
    ///
    /// Returns `ServerError::Schema` if the boundary schemas fail to compile.
    pub fn new(service: Arc<AssetService>, tokens: Arc<TokenTable>) -> Result<Self, ServerError> {
        Ok(Self {
            service,
            tokens,
            schemas: SchemaRegistry::new()?,
        })
    }

    /// Authenticate, route, and run one request.
    #[must_use]
    pub fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let response = self.route(request).unwrap_or_else(|rejection| rejection);
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "handled request"
        );
        response
    }

    fn route(&self, request: &ApiRequest) -> Routed {
        self.tokens.authorize(request.authorization.as_deref())?;
        let (path, query) = Query::split(&request.url)?;

        let svc = &self.service;
        match (request.method.as_str(), path) {
            ("GET", "/categories") => Ok(ApiResponse::ok(&svc.list_categories())),
            ("POST", "/category") => {
                let body: CategoryFieldsRequest =
                    self.decode("category_fields_request", &request.body)?;
                Ok(ApiResponse::ok(
                    &svc.create_category(&body.category_name, &body.fields)?,
                ))
            }
            ("POST", "/category/fields") => {
                let body: CategoryFieldsRequest =
                    self.decode("category_fields_request", &request.body)?;
                Ok(ApiResponse::ok(
                    &svc.add_fields(&body.category_name, &body.fields)?,
                ))
            }
            ("POST", "/category/field/delete") => {
                let body: FieldDeleteRequest = self.decode("field_delete_request", &request.body)?;
                svc.remove_field(&body.category_name, &body.field_name)?;
                Ok(ApiResponse::ok(&Ack::new(format!(
                    "Field '{}' removed from '{}'",
                    body.field_name, body.category_name
                ))))
            }
            ("POST", "/category/delete") => {
                let body: CategoryDeleteRequest =
                    self.decode("category_delete_request", &request.body)?;
                svc.remove_category(&body.category_name)?;
                Ok(ApiResponse::ok(&Ack::new(format!(
                    "Category '{}' deleted",
                    body.category_name
                ))))
            }
            ("POST", "/asset") => {
                let body: AssetInput = self.decode("asset_input", &request.body)?;
                let attributes = text_attributes(&body.table_name, &body.data)?;
                let record = svc.add_asset(&body.table_name, &attributes)?;
                Ok(ApiResponse::ok(&record))
            }
            ("GET", "/asset/search") => {
                let hits = svc.search(query.require("table_name")?, query.require("identifier")?)?;
                let flattened: Vec<BTreeMap<String, String>> =
                    hits.iter().map(AssetRecord::flatten).collect();
                Ok(ApiResponse::ok(&flattened))
            }
            ("PUT", "/asset/reassign") => {
                let body: ReassignRequest = self.decode("reassign_request", &request.body)?;
                let patch = text_attributes(&body.table_name, &body.fields)?;
                let record =
                    svc.reassign(&body.table_name, &body.identifier, &ReassignUpdate::new(patch))?;
                Ok(ApiResponse::ok(&record))
            }
            ("DELETE", "/asset") => {
                let table = query.require("table_name")?;
                let identifier = query.require("identifier")?;
                svc.delete_asset(table, identifier)?;
                Ok(ApiResponse::ok(&Ack::new(format!(
                    "Asset '{identifier}' deleted from '{table}'"
                ))))
            }
            ("GET", "/dashboard-stats") => Ok(ApiResponse::ok(&svc.dashboard_stats())),
            ("GET", "/export") => {
                let sheet = svc.export_table(query.require("table_name")?)?;
                Ok(ApiResponse::ok(&Workbook {
                    sheets: vec![sheet],
                }))
            }
            ("GET", "/export-all") => Ok(ApiResponse::ok(&svc.export_all())),
            ("POST", "/import") => {
                let report = svc.import_reader(request.body.as_bytes(), |_| {})?;
                Ok(ApiResponse::ok(&report))
            }
            (method, path) => Err(unrouted(method, path)),
        }
    }

    /// Validate `body` against a registered schema, then deserialize it.
    fn decode<T: DeserializeOwned>(&self, schema: &str, body: &str) -> Result<T, ApiResponse> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            ApiResponse::error(400, "invalid_request", &format!("body is not JSON: {e}"))
        })?;
        self.schemas.validate(schema, &value)?;
        serde_json::from_value(value)
            .map_err(|e| ApiResponse::error(400, "invalid_request", &e.to_string()))
    }
}

fn text_attributes(
    table: &str,
    data: &BTreeMap<String, Value>,
) -> Result<BTreeMap<String, String>, ApiResponse> {
    attributes_from_json(data).map_err(|problem| {
        ApiResponse::from(StoreError::from(CoreError::Validation {
            category: table.to_string(),
            problems: vec![problem],
        }))
    })
}

fn unrouted(method: &str, path: &str) -> ApiResponse {
    if ROUTES.iter().any(|(_, known)| *known == path) {
        ApiResponse::error(
            405,
            "method_not_allowed",
            &format!("{method} is not supported on {path}"),
        )
    } else {
        ApiResponse::error(404, "route_not_found", &format!("no route for {path}"))
    }
}
