// ABOUTME: HTTP-level tests for the axum router: form boundary, navigation and health
// ABOUTME: Drives the full middleware stack with tower oneshot requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use common::ScriptedProvider;
use fitness_ai_server::config::{BackendKind, ServerConfig, TransportFailurePolicy};
use fitness_ai_server::flows::{FlowRegistry, UnavailableBackend};
use fitness_ai_server::server::build_router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router_with(provider: Arc<ScriptedProvider>) -> Router {
    let registry = common::prompt_registry(provider);
    build_router(&ServerConfig::defaults(), Arc::new(registry))
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-authenticated-user", user);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_food_lookup_returns_camel_case_output() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(json!({
        "foodName": "oats",
        "calories": "150 kcal",
        "protein": "5g",
        "carbs": "27g",
        "fats": "3g"
    }));
    let app = router_with(Arc::clone(&provider));

    let response = app
        .oneshot(post_json("/api/food-nutrition", &json!({"foodName": "oats"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["foodName"], "oats");
    assert_eq!(body["calories"], "150 kcal");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_form_rules_reject_before_any_backend_call() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(json!({}));
    let app = router_with(Arc::clone(&provider));

    let response = app
        .oneshot(post_json("/api/food-nutrition", &json!({"foodName": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["details"]["fields"][0]["field"], "foodName");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_form_bmi_range_is_enforced() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(json!({}));
    let app = router_with(Arc::clone(&provider));

    let response = app
        .oneshot(post_json(
            "/api/diet-plan",
            &json!({
                "bmi": 75,
                "weightGoal": "lose weight",
                "dietaryPreferences": "vegetarian"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_a_json_error_response() {
    common::init_test_logging();
    let app = router_with(ScriptedProvider::returning(json!({})));

    let request = Request::builder()
        .method("POST")
        .uri("/api/food-nutrition")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_masked_provider_failure_is_bad_gateway() {
    common::init_test_logging();
    let app = router_with(ScriptedProvider::failing("model overloaded"));

    let response = app
        .oneshot(post_json("/api/food-nutrition", &json!({"foodName": "rice"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["message"], "Failed to get food nutrition information.");
}

#[tokio::test]
async fn test_navigation_redirects_anonymous_user_to_login() {
    common::init_test_logging();
    let app = router_with(ScriptedProvider::returning(json!({})));

    let response = app
        .oneshot(get("/api/navigation?path=/dashboard", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["decision"], "redirect");
    assert_eq!(body["target"], "/login");
    assert_eq!(body["routeClass"], "user");
    assert_eq!(body["session"]["status"], "anonymous");
}

#[tokio::test]
async fn test_navigation_uses_identity_header() {
    common::init_test_logging();
    let app = router_with(ScriptedProvider::returning(json!({})));

    let response = app
        .clone()
        .oneshot(get("/api/navigation?path=/login", Some("user-42")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["decision"], "redirect");
    assert_eq!(body["target"], "/dashboard");

    let response = app
        .oneshot(get("/api/navigation?path=/admin/login", Some("user-42")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["target"], "/admin/dashboard");
    assert_eq!(body["routeClass"], "admin");
}

#[tokio::test]
async fn test_navigation_allows_public_route() {
    common::init_test_logging();
    let app = router_with(ScriptedProvider::returning(json!({})));

    let response = app
        .oneshot(get("/api/navigation?path=/signup", None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["decision"], "allow");
    assert!(body.get("target").is_none());
}

#[tokio::test]
async fn test_navigation_requires_path() {
    common::init_test_logging();
    let app = router_with(ScriptedProvider::returning(json!({})));

    let response = app.oneshot(get("/api/navigation", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_and_ready() {
    common::init_test_logging();
    let app = router_with(ScriptedProvider::returning(json!({})));

    let response = app.clone().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");

    let response = app.oneshot(get("/ready", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["provider"]["provider"], "scripted");
    assert_eq!(body["provider"]["reachable"], true);
    assert_eq!(body["flows"]["diet-plan"]["backend"], "prompt");
}

#[tokio::test]
async fn test_ready_reports_unreachable_provider() {
    common::init_test_logging();
    let registry = FlowRegistry::new(
        Arc::new(UnavailableBackend::new("GEMINI_API_KEY is required")),
        Arc::new(UnavailableBackend::new("remote service not used in this test")),
        common::all_flows(BackendKind::Prompt, TransportFailurePolicy::Fallback),
    );
    let app = build_router(&ServerConfig::defaults(), Arc::new(registry));

    let response = app.oneshot(get("/ready", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["provider"]["reachable"], false);
}

#[tokio::test]
async fn test_ready_skips_provider_probe_for_remote_only_flows() {
    common::init_test_logging();
    let registry = common::http_registry(
        Arc::new(UnavailableBackend::new("remote service not used in this test")),
        TransportFailurePolicy::Fallback,
    );
    let app = build_router(&ServerConfig::defaults(), Arc::new(registry));

    let response = app.oneshot(get("/ready", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["provider"].is_null());
    assert_eq!(body["flows"]["smart-assistant"]["backend"], "http");
}
