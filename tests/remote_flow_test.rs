// ABOUTME: Integration tests for flows served by the remote HTTP flow service
// ABOUTME: Covers snake_case translation, fallback on transport failures and the propagate policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use fitness_ai_core::models::{
    DietPlanInput, MotivationalUpdateInput, WeightGoal, WorkoutSuggestionInput,
};
use fitness_ai_server::config::environment::RemoteServiceConfig;
use fitness_ai_server::config::TransportFailurePolicy;
use fitness_ai_server::flows::definitions::{DietPlan, MotivationalUpdate, WorkoutSuggestion};
use fitness_ai_server::flows::{FlowError, HttpBackend, UseCase};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> Arc<HttpBackend> {
    Arc::new(HttpBackend::new(&RemoteServiceConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    }))
}

fn diet_input() -> DietPlanInput {
    DietPlanInput {
        bmi: 22.5,
        weight_goal: WeightGoal::Maintain,
        dietary_preferences: "None".to_owned(),
        user_history: None,
    }
}

fn motivational_input() -> MotivationalUpdateInput {
    MotivationalUpdateInput {
        user_message: "I really don't feel like training today".to_owned(),
    }
}

#[tokio::test]
async fn test_remote_receives_snake_case_and_answers_in_camel_case() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/motivational-fitness-update"))
        .and(body_partial_json(json!({
            "user_message": "I really don't feel like training today"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "motivational_message": "You showed up, that counts.",
            "personalized_guidance": "Try ten minutes of mobility work."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = common::http_registry(backend_for(&server), TransportFailurePolicy::Fallback);
    let output = registry
        .flow::<MotivationalUpdate>()
        .execute(&motivational_input())
        .await
        .unwrap();

    assert_eq!(output.motivational_message, "You showed up, that counts.");
    assert_eq!(output.personalized_guidance, "Try ten minutes of mobility work.");
}

#[tokio::test]
async fn test_server_error_returns_fixed_fallback() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/recommend-diet-plan"))
        .and(body_partial_json(json!({"bmi": 22.5, "weight_goal": "maintain weight"})))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let registry = common::http_registry(backend_for(&server), TransportFailurePolicy::Fallback);
    let output = registry.flow::<DietPlan>().execute(&diet_input()).await.unwrap();

    assert_eq!(
        output.diet_plan,
        "Personalized diet plan for BMI 22.5, goal: maintain weight, preferences: None"
    );
    assert_eq!(output.grocery_list, "Sample grocery list based on the diet plan.");
}

#[tokio::test]
async fn test_unreachable_service_returns_fallback() {
    common::init_test_logging();
    // Nothing listens on port 1
    let backend = Arc::new(HttpBackend::new(&RemoteServiceConfig {
        base_url: "http://127.0.0.1:1".to_owned(),
        timeout_secs: 5,
    }));

    let registry = common::http_registry(backend, TransportFailurePolicy::Fallback);
    let input = motivational_input();
    let output = registry.flow::<MotivationalUpdate>().execute(&input).await.unwrap();

    assert_eq!(output, MotivationalUpdate::fallback(&input));
}

#[tokio::test]
async fn test_body_missing_required_fields_falls_back() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/workout-suggestion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let registry = common::http_registry(backend_for(&server), TransportFailurePolicy::Fallback);
    let input = WorkoutSuggestionInput {
        previous_exercises: vec!["squats".to_owned()],
        user_query: "what next?".to_owned(),
    };
    let output = registry.flow::<WorkoutSuggestion>().execute(&input).await.unwrap();

    assert_eq!(output, WorkoutSuggestion::fallback(&input));
}

#[tokio::test]
async fn test_propagate_policy_surfaces_transport_error() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/recommend-diet-plan"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let registry = common::http_registry(backend_for(&server), TransportFailurePolicy::Propagate);
    let error = registry
        .flow::<DietPlan>()
        .execute(&diet_input())
        .await
        .unwrap_err();

    match error {
        FlowError::Transport { flow, status, .. } => {
            assert_eq!(flow, DietPlan::NAME);
            assert_eq!(status, Some(503));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_input_never_reaches_remote() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let registry = common::http_registry(backend_for(&server), TransportFailurePolicy::Fallback);
    let error = registry
        .flow::<MotivationalUpdate>()
        .execute(&MotivationalUpdateInput {
            user_message: "   ".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(error, FlowError::Validation(ref e) if e.has_field("userMessage")));
}
