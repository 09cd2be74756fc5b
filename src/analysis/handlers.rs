use std::any::Any;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    analysis::{
        dtos::{AnalysisResponse, AnalyzeRequest, ErrorResponse},
        orchestrator::{self, AnalyzeError},
    },
    app_state::AppState,
};

/// Shown for URLs that could not be fetched.
pub const EXTRACTION_ERROR_MESSAGE: &str =
    "Could not fetch or extract article from that URL. Try pasting the article text instead.";

/// Shown when the request carries neither text nor a usable URL.
pub const INPUT_ERROR_MESSAGE: &str = "Please provide article text or a URL to analyze.";

/// Shown for unexpected failures caught at the outer boundary.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Unable to analyze article at this time. Please try again.";

#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis complete", body = AnalysisResponse),
        (status = 400, description = "Missing input or unfetchable URL", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Response {
    match orchestrator::analyze(&state, payload).await {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(AnalyzeError::EmptyInput) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: INPUT_ERROR_MESSAGE.to_string(),
            }),
        )
            .into_response(),
        Err(error @ AnalyzeError::Extraction(_)) => {
            tracing::warn!(%error, "analysis aborted");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: EXTRACTION_ERROR_MESSAGE.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// The analyzer form used to live at /analyze.
pub async fn analyze_redirect() -> Redirect {
    Redirect::temporary("/")
}

/// Maps a panic caught at the router boundary to the uniform 500 payload.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "analysis handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::heuristic::LexicalBiasHeuristic;
    use crate::config::BiasMode;
    use crate::generative::client::MockTextGenerator;
    use crate::generative::fallbacks::{
        FALLBACK_BIAS_SCORE, KEY_FACTS_PLACEHOLDER, NO_SUMMARY_NOTICE,
    };
    use crate::generative::{GenerativeService, TextGenerator};
    use axum::{
        Router,
        body::Body,
        http::{Request, header::LOCATION},
        routing::{get, post},
    };
    use std::sync::Arc;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    fn test_app(state: AppState) -> Router {
        Router::new()
            .route("/api/analyze", post(analyze))
            .with_state(state)
    }

    fn unconfigured_state(bias_mode: BiasMode) -> AppState {
        AppState {
            analysis: GenerativeService::new(None),
            heuristic: Arc::new(LexicalBiasHeuristic),
            bias_mode,
        }
    }

    fn mocked_state(mock: MockTextGenerator, bias_mode: BiasMode) -> AppState {
        let generator: Arc<dyn TextGenerator> = Arc::new(mock);
        AppState {
            analysis: GenerativeService::new(Some(generator)),
            heuristic: Arc::new(LexicalBiasHeuristic),
            bias_mode,
        }
    }

    async fn post_json(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn empty_body_is_a_bad_request() {
        let app = test_app(unconfigured_state(BiasMode::Generative));
        let (status, body) = post_json(app, serde_json::json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INPUT_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn whitespace_only_text_is_a_bad_request() {
        let app = test_app(unconfigured_state(BiasMode::Generative));
        let (status, body) = post_json(app, serde_json::json!({"articleText": "   "})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INPUT_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn a_url_field_that_is_not_a_url_is_a_bad_request() {
        let app = test_app(unconfigured_state(BiasMode::Generative));
        let (status, body) =
            post_json(app, serde_json::json!({"articleText": "", "url": "not a url"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INPUT_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn blank_input_never_reaches_the_generator() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        let app = test_app(mocked_state(mock, BiasMode::Generative));

        let (status, _) = post_json(app, serde_json::json!({"text": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn pasted_text_without_credentials_degrades_to_fallbacks() {
        let app = test_app(unconfigured_state(BiasMode::Generative));
        let (status, body) = post_json(
            app,
            serde_json::json!({"articleText": "Short piece with no notable claims."}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], NO_SUMMARY_NOTICE);
        assert_eq!(body["biasScore"], FALLBACK_BIAS_SCORE);
        assert_eq!(body["biasFlagged"], serde_json::json!([]));
        assert_eq!(body["biasSignals"], serde_json::json!([]));
        assert_eq!(body["keyFacts"], serde_json::json!([KEY_FACTS_PLACEHOLDER]));
        assert_eq!(body["reflectionQuestions"].as_array().unwrap().len(), 4);
        assert_eq!(body["difficultWords"][0]["word"], "bias");
        assert!(body["articleTitle"].is_null());
        assert!(body["url"].is_null());
    }

    #[tokio::test]
    async fn heuristic_mode_scores_without_credentials() {
        let app = test_app(unconfigured_state(BiasMode::Heuristic));
        let (status, body) = post_json(
            app,
            serde_json::json!({"articleText": "The mayor slams critics of the plan."}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["biasScore"], 85);
        assert_eq!(body["biasSignals"][0]["title"], "Loaded language");
        assert_eq!(body["biasFlagged"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn generative_mode_uses_model_output() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(|system, _, _| {
            Ok(if system.contains("concise news summarizer") {
                "A tidy summary.".to_string()
            } else if system.contains("media bias analyst") {
                r#"{"score": 62, "flagged": [{"text": "slams", "type": "loaded_language", "explanation": "Combative verb."}]}"#.to_string()
            } else if system.contains("critical thinking educator") {
                r#"["q1", "q2", "q3", "q4"]"#.to_string()
            } else if system.contains("ESL vocabulary assistant") {
                r#"[{"word": "rollout", "pronunciation": "ROLL-out", "definition": "The public launch of something.", "example": "The rollout went poorly.", "category": "Phrasal Verbs"}]"#.to_string()
            } else {
                r#"["fact one", "fact two"]"#.to_string()
            })
        });
        let app = test_app(mocked_state(mock, BiasMode::Generative));

        let (status, body) = post_json(
            app,
            serde_json::json!({"articleText": "The mayor slams critics of the plan."}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "A tidy summary.");
        assert_eq!(body["biasScore"], 62);
        assert_eq!(body["biasFlagged"][0]["type"], "loaded_language");
        assert_eq!(body["biasSignals"], serde_json::json!([]));
        assert_eq!(body["keyFacts"], serde_json::json!(["fact one", "fact two"]));
        assert_eq!(
            body["reflectionQuestions"],
            serde_json::json!(["q1", "q2", "q3", "q4"])
        );
        assert_eq!(body["difficultWords"][0]["category"], "Phrasal Verbs");
    }

    #[tokio::test]
    async fn malformed_json_bodies_are_rejected_before_the_handler() {
        let app = test_app(unconfigured_state(BiasMode::Generative));
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from("this is not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn legacy_analyze_path_redirects_home() {
        let app: Router = Router::new().route("/analyze", get(analyze_redirect));
        let request = Request::builder()
            .method("GET")
            .uri("/analyze")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[LOCATION], "/");
    }

    #[tokio::test]
    async fn a_panicking_handler_becomes_a_json_500() {
        let app: Router = Router::new()
            .route(
                "/api/analyze",
                post(|| async {
                    panic!("boom");
                    #[allow(unreachable_code)]
                    ()
                }),
            )
            .layer(CatchPanicLayer::custom(handle_panic));

        let (status, body) = post_json(app, serde_json::json!({})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    }
}
