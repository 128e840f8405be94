//! Router-level tests: requests go through the full axum stack with a
//! fixed clock.

#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use theater_workbench::api::build_app;
use theater_workbench::app_state::AppState;
use theater_workbench::domain::{FixedClock, StaticConfig, TagCatalog};
use theater_workbench::service::WorkbenchService;

fn now() -> DateTime<Utc> {
    let Some(ts) = Utc.with_ymd_and_hms(2025, 10, 15, 10, 0, 0).single() else {
        panic!("valid timestamp");
    };
    ts
}

fn app() -> Router {
    let workbench = WorkbenchService::new(
        Arc::new(FixedClock::new(now())),
        Arc::new(StaticConfig::default()),
        Arc::new(TagCatalog::builtin()),
    );
    build_app(AppState::new(workbench), Duration::from_secs(5))
}

async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    };
    let Ok(request) = request else {
        panic!("request should build");
    };
    let Ok(response) = app().oneshot(request).await;
    let status = response.status();
    let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
        panic!("body should be readable");
    };
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Looks up `pointer` in `value`, e.g. `"/summary/count"`.
fn at<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    value.pointer(pointer)
}

/// Copies the fields of `extra` over `base`.
fn with_fields(mut base: Value, extra: Value) -> Value {
    if let (Some(target), Value::Object(fields)) = (base.as_object_mut(), extra) {
        target.extend(fields);
    }
    base
}

fn reservation(id: &str, status: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "eventId": "EVT-1",
        "status": status,
        "paymentStatus": "pending",
        "totalPrice": 120.0,
        "numberOfPersons": 4,
        "contactPerson": format!("Contact {id}"),
        "email": format!("{}@example.com", id.to_lowercase()),
        "createdAt": created_at,
        "tags": []
    })
}

#[tokio::test]
async fn health_reports_fixed_clock() {
    let (status, body) = send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(at(&body, "/status"), Some(&json!("healthy")));
    assert_eq!(at(&body, "/timestamp"), Some(&json!(now().to_rfc3339())));
}

#[tokio::test]
async fn thresholds_expose_defaults() {
    let (status, body) = send(Method::GET, "/config/thresholds", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(at(&body, "/thresholds/expiringSoonDays"), Some(&json!(2)));
    assert_eq!(at(&body, "/thresholds/focusPendingLimit"), Some(&json!(5)));
    assert_eq!(at(&body, "/defaultOptionTermDays"), Some(&json!(7)));
}

#[tokio::test]
async fn query_hides_waitlist_and_searches() {
    let jan = with_fields(
        reservation("R2", "confirmed", "2025-10-10T09:00:00Z"),
        json!({ "email": "Jan@Example.com" }),
    );
    let body = json!({
        "reservations": [
            reservation("R1", "pending", "2025-10-12T09:00:00Z"),
            jan,
            reservation("R3", "waitlist", "2025-10-14T09:00:00Z"),
        ],
        "query": { "searchQuery": "jan@" }
    });
    let (status, result) = send(Method::POST, "/api/v1/reservations/query", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let Some(list) = at(&result, "/reservations").and_then(Value::as_array) else {
        panic!("reservations array expected");
    };
    assert_eq!(list.len(), 1);
    assert_eq!(at(&result, "/reservations/0/id"), Some(&json!("R2")));
    assert_eq!(at(&result, "/summary/count"), Some(&json!(1)));
}

#[tokio::test]
async fn query_accepts_legacy_tag_objects() {
    let tagged = with_fields(
        reservation("R1", "confirmed", "2025-10-12T09:00:00Z"),
        json!({ "tags": [{ "id": "VIP", "label": "VIP" }, "MPL", { "label": "DIEET" }, " "] }),
    );
    let body = json!({ "reservations": [tagged] });
    let (status, result) = send(Method::POST, "/api/v1/reservations/query", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        at(&result, "/reservations/0/tags"),
        Some(&json!([{ "id": "VIP" }, { "id": "MPL" }, { "id": "DIEET" }]))
    );
}

#[tokio::test]
async fn dashboard_flags_overdue_payment() {
    let overdue = with_fields(
        reservation("R1", "confirmed", "2025-10-01T09:00:00Z"),
        json!({ "paymentDueDate": "2025-10-12T10:00:00Z" }),
    );
    let body = json!({ "reservations": [overdue] });
    let (status, result) = send(Method::POST, "/api/v1/reservations/dashboard", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        at(&result, "/stats/paymentDeadlineWarnings"),
        Some(&json!(1))
    );
    assert_eq!(
        at(&result, "/focusItems/0/title"),
        Some(&json!("Betaling 3 dagen te laat"))
    );
    assert_eq!(at(&result, "/focusItems/0/urgency"), Some(&json!("high")));
}

#[tokio::test]
async fn classify_option_expiring_tomorrow() {
    let option = with_fields(
        reservation("R1", "option", "2025-10-10T09:00:00Z"),
        json!({ "optionExpiresAt": "2025-10-16T08:00:00Z" }),
    );
    let body = json!({ "reservation": option });
    let (status, result) = send(Method::POST, "/api/v1/options/classify", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(at(&result, "/state"), Some(&json!("expiring-soon")));
    assert_eq!(at(&result, "/label"), Some(&json!("Verloopt morgen")));
    assert_eq!(
        at(&result, "/expiryColor/status"),
        Some(&json!("expiring-soon"))
    );
}

#[tokio::test]
async fn classify_lapsed_option_agrees_on_expired() {
    let option = with_fields(
        reservation("R1", "option", "2025-10-10T09:00:00Z"),
        json!({ "optionExpiresAt": "2025-10-15T05:00:00Z" }),
    );
    let body = json!({ "reservation": option });
    let (status, result) = send(Method::POST, "/api/v1/options/classify", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(at(&result, "/state"), Some(&json!("expired")));
    assert_eq!(at(&result, "/label"), Some(&json!("VERLOPEN")));
    assert_eq!(at(&result, "/expiryColor/status"), Some(&json!("expired")));
    assert_eq!(at(&result, "/expiryText"), Some(&json!("VERLOPEN")));
}

#[tokio::test]
async fn expiry_sweep_lists_reached_expiries() {
    let gone = with_fields(
        reservation("R1", "option", "2025-10-01T09:00:00Z"),
        json!({ "optionExpiresAt": "2025-10-15T10:00:00Z" }),
    );
    let alive = with_fields(
        reservation("R2", "option", "2025-10-01T09:00:00Z"),
        json!({ "optionExpiresAt": "2025-10-20T10:00:00Z" }),
    );
    let body = json!({ "reservations": [gone, alive] });
    let (status, result) = send(Method::POST, "/api/v1/options/expiry-sweep", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(at(&result, "/processed"), Some(&json!(2)));
    assert_eq!(at(&result, "/cancellations/0/id"), Some(&json!("R1")));
    assert_eq!(
        at(&result, "/cancellations")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
async fn extend_and_place_options() {
    let body = json!({ "currentExpiry": "2025-01-28T16:45:00Z", "extraDays": 7 });
    let (status, result) = send(Method::POST, "/api/v1/options/extend", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        at(&result, "/expiresAt"),
        Some(&json!("2025-02-04T16:45:00Z"))
    );

    let (status, result) = send(Method::POST, "/api/v1/options/expiry", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        at(&result, "/expiresAt"),
        Some(&json!("2025-10-22T10:00:00Z"))
    );
}

#[tokio::test]
async fn option_terms_and_term_expiry() {
    let (status, all) = send(Method::GET, "/api/v1/option-terms", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, available) = send(Method::GET, "/api/v1/option-terms?available=true", None).await;
    let count = |v: &Value| v.as_array().map_or(0, Vec::len);
    assert_eq!(count(&all), count(&available) + 1);

    let (status, result) = send(
        Method::POST,
        "/api/v1/option-terms/3days/expiry",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        at(&result, "/expiresAt"),
        Some(&json!("2025-10-18T10:00:00Z"))
    );

    let (status, result) = send(
        Method::POST,
        "/api/v1/option-terms/forever/expiry",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(at(&result, "/error/code"), Some(&json!(2002)));

    let (status, _) = send(
        Method::POST,
        "/api/v1/option-terms/custom/expiry",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tag_lookup_and_read_only_catalog() {
    let (status, tag) = send(Method::GET, "/api/v1/tags/VIP", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(at(&tag, "/id"), Some(&json!("VIP")));
    assert!(at(&tag, "/textColor").is_some_and(Value::is_string));

    let (status, body) = send(Method::GET, "/api/v1/tags/NOPE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(at(&body, "/error/code"), Some(&json!(2001)));

    let (status, body) = send(Method::PUT, "/api/v1/tags/VIP", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(at(&body, "/error/code"), Some(&json!(2003)));
}

#[tokio::test]
async fn quick_pick_and_category_filter() {
    let flag = |t: &Value, field: &str| t.get(field) == Some(&json!(true));

    let (status, quick) = send(Method::GET, "/api/v1/tags/quick-pick", None).await;
    assert_eq!(status, StatusCode::OK);
    let Some(quick) = quick.as_array() else {
        panic!("array expected");
    };
    let default_and_active = |t: &Value| flag(t, "isDefault") && flag(t, "isActive");
    assert!(quick.iter().all(default_and_active));

    let (status, internal) = send(Method::GET, "/api/v1/tags?category=internal", None).await;
    assert_eq!(status, StatusCode::OK);
    let Some(internal) = internal.as_array() else {
        panic!("array expected");
    };
    assert!(!internal.is_empty());
    assert!(
        internal
            .iter()
            .all(|t| t.get("category") == Some(&json!("internal")) && flag(t, "isActive"))
    );
}

#[tokio::test]
async fn contrast_color_endpoint() {
    let (status, body) = send(Method::GET, "/api/v1/colors/contrast?background=FFFFFF", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(at(&body, "/textColor"), Some(&json!("#000000")));
}

#[tokio::test]
async fn bulk_tags_and_migration_preview() {
    let tagged = with_fields(
        reservation("R1", "confirmed", "2025-10-01T09:00:00Z"),
        json!({ "tags": ["VIP"] }),
    );
    let body = json!({ "reservations": [tagged.clone()], "tags": ["PERS"], "mode": "replace" });
    let (status, result) = send(Method::POST, "/api/v1/tags/bulk", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(at(&result, "/0/tags"), Some(&json!([{ "id": "PERS" }])));

    let deluxe = with_fields(tagged, json!({ "arrangement": "BWFM" }));
    let body = json!({ "reservations": [deluxe] });
    let (status, result) = send(Method::POST, "/api/v1/tags/migration-preview", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(at(&result, "/needsUpdate"), Some(&json!(1)));
    assert_eq!(
        at(&result, "/migrations/0/added"),
        Some(&json!([{ "id": "DELUXE" }]))
    );
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, doc) = send(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    let Some(paths) = at(&doc, "/paths").and_then(Value::as_object) else {
        panic!("paths object expected");
    };
    let classify = paths.get("/api/v1/options/classify");
    assert!(classify.is_some_and(Value::is_object));
}
