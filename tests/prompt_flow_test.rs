// ABOUTME: Integration tests for flows served by the generative-text prompt backend
// ABOUTME: Covers template rendering, media parts, output contracts and action error masking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{ScriptedProvider, PHOTO_DATA_URI};
use fitness_ai_core::models::{FoodNutritionInput, WorkoutFeedbackInput};
use fitness_ai_server::actions::Action;
use fitness_ai_server::config::{BackendKind, TransportFailurePolicy};
use fitness_ai_server::errors::ErrorCode;
use fitness_ai_server::flows::definitions::{FoodNutrition, WorkoutFeedback};
use fitness_ai_server::flows::{FlowError, FlowRegistry, PromptBackend, UnavailableBackend, UseCase};
use fitness_ai_server::llm::GeminiProvider;
use fitness_ai_server::session::SessionContext;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn apple() -> FoodNutritionInput {
    FoodNutritionInput {
        food_name: "apple".to_owned(),
    }
}

fn squat_frame() -> WorkoutFeedbackInput {
    WorkoutFeedbackInput {
        workout_type: "squats".to_owned(),
        target_muscle_groups: "quads, glutes".to_owned(),
        photo_data_uri: PHOTO_DATA_URI.to_owned(),
    }
}

#[tokio::test]
async fn test_prompt_is_rendered_and_numbers_become_text() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(json!({
        "foodName": "apple",
        "calories": 95,
        "protein": "0.5g",
        "carbs": "25g",
        "fats": "0.3g"
    }));
    let registry = common::prompt_registry(Arc::clone(&provider));

    let output = registry.flow::<FoodNutrition>().execute(&apple()).await.unwrap();

    assert_eq!(output.calories, "95");
    assert_eq!(output.carbs, "25g");
    let request = provider.last_request().unwrap();
    assert!(request.prompt.contains("Food Name: apple"));
    assert!(!request.prompt.contains("{{"));
    assert_eq!(request.output_schema["required"][1], "calories");
    assert!(request.media.is_empty());
}

#[tokio::test]
async fn test_configured_temperature_reaches_provider() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(json!({
        "foodName": "apple",
        "calories": "95 kcal",
        "protein": "0.5g",
        "carbs": "25g",
        "fats": "0.3g"
    }));
    let registry = FlowRegistry::new(
        Arc::new(PromptBackend::new(Arc::<ScriptedProvider>::clone(&provider)).with_temperature(Some(0.3))),
        Arc::new(UnavailableBackend::new("remote service not used in this test")),
        common::all_flows(BackendKind::Prompt, TransportFailurePolicy::Fallback),
    );

    registry.flow::<FoodNutrition>().execute(&apple()).await.unwrap();
    assert_eq!(provider.last_request().unwrap().temperature, Some(0.3));

    common::prompt_registry(Arc::clone(&provider))
        .flow::<FoodNutrition>()
        .execute(&apple())
        .await
        .unwrap();
    assert_eq!(provider.last_request().unwrap().temperature, None);
}

#[tokio::test]
async fn test_media_tag_becomes_inline_image() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(json!({
        "formFeedback": "Keep your chest up.",
        "repFeedback": "Hold this depth for every rep.",
        "performanceScore": 78,
        "motivationalMessage": "Strong set!"
    }));
    let registry = common::prompt_registry(Arc::clone(&provider));

    let output = registry
        .flow::<WorkoutFeedback>()
        .execute(&squat_frame())
        .await
        .unwrap();

    assert!((output.performance_score - 78.0).abs() < f64::EPSILON);
    let request = provider.last_request().unwrap();
    assert_eq!(request.media.len(), 1);
    assert_eq!(request.media[0].mime_type, "image/png");
    assert_eq!(request.media[0].data, "iVBORw0KGgo=");
    assert!(request.prompt.contains("Workout Type: squats"));
    assert!(request.prompt.contains("[image 1]"));
}

#[tokio::test]
async fn test_missing_required_output_is_a_contract_error() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(json!({"foodName": "apple"}));
    let registry = common::prompt_registry(provider);

    let error = registry
        .flow::<FoodNutrition>()
        .execute(&apple())
        .await
        .unwrap_err();

    assert!(matches!(error, FlowError::Contract { .. }), "got {error:?}");
}

#[tokio::test]
async fn test_out_of_range_score_is_a_contract_error() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(json!({
        "formFeedback": "ok",
        "repFeedback": "ok",
        "performanceScore": 150,
        "motivationalMessage": "ok"
    }));
    let registry = common::prompt_registry(provider);

    let error = registry
        .flow::<WorkoutFeedback>()
        .execute(&squat_frame())
        .await
        .unwrap_err();

    assert_eq!(error.kind(), "contract");
}

#[tokio::test]
async fn test_provider_failure_is_not_replaced_by_fallback() {
    common::init_test_logging();
    let provider = ScriptedProvider::failing("quota exhausted");
    let registry = common::prompt_registry(provider);

    let error = registry
        .flow::<FoodNutrition>()
        .execute(&apple())
        .await
        .unwrap_err();

    assert_eq!(error.kind(), "provider");
}

#[tokio::test]
async fn test_action_masks_contract_errors_as_invalid_response() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(json!({"foodName": "apple"}));
    let action = Action::<FoodNutrition>::from_registry(&common::prompt_registry(provider));

    let error = action
        .handle(&SessionContext::authenticated("u-1", None), apple())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidResponse);
    assert_eq!(error.message, "Invalid response from getFoodNutrition.");
}

#[tokio::test]
async fn test_action_masks_provider_errors_with_generic_message() {
    common::init_test_logging();
    let provider = ScriptedProvider::failing("upstream exploded with secrets");
    let action = Action::<FoodNutrition>::from_registry(&common::prompt_registry(provider));

    let error = action
        .handle(&SessionContext::anonymous(), apple())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(error.message, FoodNutrition::GENERIC_ERROR);
    assert!(!error.message.contains("secrets"));
}

#[tokio::test]
async fn test_action_passes_validation_errors_through() {
    common::init_test_logging();
    let provider = ScriptedProvider::returning(json!({}));
    let action =
        Action::<FoodNutrition>::from_registry(&common::prompt_registry(Arc::clone(&provider)));

    let error = action
        .handle(
            &SessionContext::anonymous(),
            FoodNutritionInput {
                food_name: String::new(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(error.details["fields"][0]["field"], "foodName");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_gemini_provider_structured_call() {
    common::init_test_logging();
    let server = MockServer::start().await;
    let answer = json!({
        "foodName": "banana",
        "calories": "105 kcal",
        "protein": "1.3g",
        "carbs": "27g",
        "fats": "0.4g"
    });
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(query_param_is_missing("key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": answer.to_string()}]},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.uri());
    let registry = common::prompt_registry_with(Arc::new(provider));

    let output = registry
        .flow::<FoodNutrition>()
        .execute(&FoodNutritionInput {
            food_name: "banana".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(output.calories, "105 kcal");
    assert_eq!(output.food_name, "banana");
}

#[tokio::test]
async fn test_gemini_quota_error_is_a_provider_error() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Resource has been exhausted"}
        })))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.uri());
    let registry = common::prompt_registry_with(Arc::new(provider));

    let error = registry
        .flow::<FoodNutrition>()
        .execute(&apple())
        .await
        .unwrap_err();

    match error {
        FlowError::Provider { source, .. } => {
            assert_eq!(source.code, ErrorCode::ExternalRateLimited);
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}
