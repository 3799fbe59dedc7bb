pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/resume/analyze", post(handlers::handle_analyze))
        .route("/api/v1/resume/ask", post(handlers::handle_ask))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::reasoner::LocalReasoner;

    fn test_router() -> Router {
        build_router(AppState {
            reasoner: Arc::new(LocalReasoner),
        })
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_returns_camel_case_result() {
        let (status, json) = post_json(
            "/api/v1/resume/analyze",
            json!({"resume_text": "Summary: PM. Experience: grew retention 12% across 3 launches."}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["atsScore"].as_u64().unwrap() <= 100);
        assert_eq!(json["externallyEnhanced"], false);
        assert_eq!(json["engineLabel"], "Local heuristics");
        assert_eq!(json["breakdown"].as_array().unwrap().len(), 5);
        assert_eq!(json["sectionsReviewed"], json!(["Summary", "Experience"]));
        assert_eq!(json["evidence"]["metricSamples"], json!(["12%", "3"]));
    }

    #[tokio::test]
    async fn test_analyze_empty_text_is_bad_request() {
        let (status, json) = post_json("/api/v1/resume/analyze", json!({"resume_text": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "EMPTY_INPUT");
        assert_eq!(
            json["error"]["message"],
            "Upload a PDF or TXT resume so we can analyze the content."
        );
    }

    #[tokio::test]
    async fn test_ask_blank_question_is_bad_request() {
        let (status, json) = post_json(
            "/api/v1/resume/ask",
            json!({"question": "  ", "resume_text": "Led a team."}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "EMPTY_QUESTION");
    }

    #[tokio::test]
    async fn test_ask_returns_snippets_and_engine_label() {
        let (status, json) = post_json(
            "/api/v1/resume/ask",
            json!({"question": "What did I launch?", "resume_text": "Led a team. Drove the launch of v2."}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["snippets"], json!(["Drove the launch of v2."]));
        assert_eq!(json["engineLabel"], "Local fallback · RAG grounded");
        assert_eq!(json["sources"], json!(["Resume context (RAG)"]));
    }
}
