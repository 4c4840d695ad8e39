//! Route-level tests driving `Router::handle` directly.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use stk_config::UserEntry;
use stk_core::identity::Role;
use stk_server::{ApiRequest, ApiResponse, Router, TokenTable};
use stk_store::AssetService;

const ADMIN: &str = "t-admin";
const VIEWER: &str = "t-viewer";

#[fixture]
fn router() -> Router {
    let tokens = Arc::new(TokenTable::new(vec![
        UserEntry {
            name: "ops".into(),
            token: ADMIN.into(),
            role: Role::Admin,
        },
        UserEntry {
            name: "viewer".into(),
            token: VIEWER.into(),
            role: Role::User,
        },
    ]));
    let service = Arc::new(AssetService::in_memory().with_users(tokens.clone()));
    Router::new(service, tokens).unwrap()
}

fn call(router: &Router, method: &str, url: &str, body: Option<Value>) -> ApiResponse {
    let mut request = ApiRequest::new(method, url).bearer(ADMIN);
    if let Some(body) = body {
        request = request.json(&body);
    }
    router.handle(&request)
}

fn create_laptop(router: &Router) {
    let response = call(
        router,
        "POST",
        "/category",
        Some(json!({
            "category_name": "laptop",
            "fields": [
                {"name": "asset_tag", "type": "text"},
                {"name": "asset_code", "type": "text"},
                {"name": "ram", "type": "integer"}
            ]
        })),
    );
    assert_eq!(response.status, 200, "{}", response.body);
}

fn add_lt01(router: &Router) -> ApiResponse {
    call(
        router,
        "POST",
        "/asset",
        Some(json!({
            "table_name": "laptop",
            "data": {"asset_tag": "LT01", "asset_code": "C-9", "ram": 16, "remarks": null}
        })),
    )
}

#[rstest]
fn full_scenario(router: Router) {
    create_laptop(&router);

    let categories = call(&router, "GET", "/categories", None);
    assert_eq!(
        categories.body,
        json!([{
            "table": "laptop",
            "fields": [
                {"name": "asset_tag", "type": "text"},
                {"name": "asset_code", "type": "text"},
                {"name": "ram", "type": "integer"}
            ]
        }])
    );

    let added = add_lt01(&router);
    assert_eq!(added.status, 200, "{}", added.body);
    assert_eq!(added.body["attributes"]["ram"], "16");

    let found = call(
        &router,
        "GET",
        "/asset/search?table_name=laptop&identifier=LT01",
        None,
    );
    assert_eq!(
        found.body,
        json!([{"asset_tag": "LT01", "asset_code": "C-9", "ram": "16"}])
    );

    let reassigned = call(
        &router,
        "PUT",
        "/asset/reassign",
        Some(json!({
            "table_name": "laptop",
            "identifier": "LT01",
            "remarks": "reissued",
            "user_name": ""
        })),
    );
    assert_eq!(reassigned.status, 200, "{}", reassigned.body);
    assert_eq!(reassigned.body["attributes"]["remarks"], "reissued");
    assert_eq!(reassigned.body["attributes"]["ram"], "16");

    let stats = call(&router, "GET", "/dashboard-stats", None);
    assert_eq!(stats.body["asset_counts_by_category"]["laptop"], 1);
    assert_eq!(stats.body["user_count"], 2);

    let export = call(&router, "GET", "/export?table_name=laptop", None);
    assert_eq!(
        export.body["sheets"][0]["headers"],
        json!(["asset_tag", "asset_code", "ram", "remarks"])
    );

    let deleted = call(
        &router,
        "DELETE",
        "/asset?table_name=laptop&identifier=C-9",
        None,
    );
    assert_eq!(deleted.status, 200);

    let removed = call(
        &router,
        "POST",
        "/category/delete",
        Some(json!({"category_name": "laptop"})),
    );
    assert_eq!(removed.status, 200);
    let gone = call(
        &router,
        "GET",
        "/asset/search?table_name=laptop&identifier=LT01",
        None,
    );
    assert_eq!(gone.status, 404);
    assert_eq!(gone.body["error"], "unknown_category");
}

#[rstest]
fn authentication_is_required(router: Router) {
    let anonymous = router.handle(&ApiRequest::new("GET", "/categories"));
    assert_eq!(anonymous.status, 401);

    let viewer = router.handle(&ApiRequest::new("GET", "/categories").bearer(VIEWER));
    assert_eq!(viewer.status, 403);
}

#[rstest]
fn duplicate_category_is_conflict(router: Router) {
    create_laptop(&router);
    let again = call(
        &router,
        "POST",
        "/category",
        Some(json!({"category_name": "laptop", "fields": [{"name": "asset_tag", "type": "text"}]})),
    );
    assert_eq!(again.status, 409);
    assert_eq!(again.body["error"], "duplicate_category");
}

#[rstest]
fn field_routes(router: Router) {
    create_laptop(&router);
    let extended = call(
        &router,
        "POST",
        "/category/fields",
        Some(json!({"category_name": "laptop", "fields": [{"name": "Purchased", "type": "date"}]})),
    );
    assert_eq!(extended.status, 200);
    assert_eq!(extended.body["fields"][3]["name"], "purchased");

    let collision = call(
        &router,
        "POST",
        "/category/fields",
        Some(json!({"category_name": "laptop", "fields": [{"name": "ram", "type": "int"}]})),
    );
    assert_eq!(collision.status, 409);

    let unknown_field = call(
        &router,
        "POST",
        "/category/field/delete",
        Some(json!({"category_name": "laptop", "field_name": "gpu"})),
    );
    assert_eq!(unknown_field.status, 404);
    assert_eq!(unknown_field.body["error"], "unknown_field");

    let bad_type = call(
        &router,
        "POST",
        "/category/fields",
        Some(json!({"category_name": "laptop", "fields": [{"name": "weight", "type": "float"}]})),
    );
    assert_eq!(bad_type.status, 400);
    assert_eq!(bad_type.body["error"], "invalid_field_list");
}

#[rstest]
#[case::not_json("POST", "/category", "{not json")]
#[case::schema_violation("POST", "/category", r#"{"category_name": "laptop"}"#)]
#[case::wrong_shape("POST", "/asset", r#"{"table_name": "laptop", "data": [1, 2]}"#)]
fn malformed_bodies_are_rejected(
    router: Router,
    #[case] method: &str,
    #[case] url: &str,
    #[case] body: &str,
) {
    let response = router.handle(&ApiRequest::new(method, url).bearer(ADMIN).text(body));
    assert_eq!(response.status, 400);
    assert_eq!(response.body["error"], "invalid_request");
}

#[rstest]
fn validation_errors_are_bad_requests(router: Router) {
    create_laptop(&router);
    let response = call(
        &router,
        "POST",
        "/asset",
        Some(json!({"table_name": "laptop", "data": {"asset_tag": "LT01", "gpu": "x"}})),
    );
    assert_eq!(response.status, 400);
    assert_eq!(response.body["error"], "validation_error");
    let detail = response.body["detail"].as_str().unwrap();
    assert!(detail.contains("unknown field 'gpu'"), "{detail}");
    assert!(detail.contains("missing required field 'ram'"), "{detail}");
}

#[rstest]
fn missing_record_is_not_found(router: Router) {
    create_laptop(&router);
    let response = call(
        &router,
        "PUT",
        "/asset/reassign",
        Some(json!({"table_name": "laptop", "identifier": "LT99", "remarks": "x"})),
    );
    assert_eq!(response.status, 404);
    assert_eq!(response.body["error"], "not_found");
}

#[rstest]
fn empty_search_is_success(router: Router) {
    create_laptop(&router);
    let response = call(
        &router,
        "GET",
        "/asset/search?table_name=laptop&identifier=nothing",
        None,
    );
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!([]));
}

#[rstest]
fn missing_query_parameter(router: Router) {
    let response = call(&router, "GET", "/export", None);
    assert_eq!(response.status, 400);
}

#[rstest]
#[case::unknown_path("GET", "/nowhere", 404)]
#[case::wrong_method("PATCH", "/asset", 405)]
fn unrouted_requests(router: Router, #[case] method: &str, #[case] url: &str, #[case] status: u16) {
    assert_eq!(call(&router, method, url, None).status, status);
}

#[rstest]
fn import_collects_failures(router: Router) {
    create_laptop(&router);
    let body = [
        r#"{"sheet": "laptop", "data": {"asset_tag": "LT01", "asset_code": "C-1", "ram": 8}}"#,
        r#"{"sheet": "printer", "data": {"asset_tag": "P1"}}"#,
    ]
    .join("\n");
    let response = router.handle(&ApiRequest::new("POST", "/import").bearer(ADMIN).text(&body));
    assert_eq!(response.status, 200);
    assert_eq!(response.body["total_rows"], 2);
    assert_eq!(response.body["succeeded"], 1);
    assert_eq!(response.body["failed"][0]["sheet"], "printer");

    let all = call(&router, "GET", "/export-all", None);
    assert_eq!(all.body["sheets"][0]["rows"], json!([["LT01", "C-1", "8"]]));
}

#[test]
fn writes_through_the_router_survive_a_restart() {
    let temp = tempfile::tempdir().unwrap();
    let tokens = Arc::new(TokenTable::new(vec![UserEntry {
        name: "ops".into(),
        token: ADMIN.into(),
        role: Role::Admin,
    }]));

    {
        let (service, _) = AssetService::open(temp.path()).unwrap();
        let router = Router::new(Arc::new(service), Arc::clone(&tokens)).unwrap();
        create_laptop(&router);
        assert_eq!(add_lt01(&router).status, 200);
    }

    let (service, report) = AssetService::open(temp.path()).unwrap();
    assert_eq!(report.operations_replayed, 2);
    let router = Router::new(Arc::new(service), tokens).unwrap();
    let hits = call(&router, "GET", "/asset/search?table_name=laptop&identifier=LT01", None);
    assert_eq!(hits.status, 200);
    assert_eq!(hits.body[0]["ram"], "16");
}
