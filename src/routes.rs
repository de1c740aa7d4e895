use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::ai::{
    build_lesson_prompt, build_rectify_question, build_sermon_continuation, build_sermon_request,
    parse_sermon, profile_for, GenerationResult, ResponseGenerator, LESSON_SYSTEM_PROMPT,
    SERMON_SYSTEM_PROMPT,
};
use crate::classifier::Mode;
use crate::models::{
    ApiMessage, ChatRequest, ChatResponse, LessonRequest, LessonResponse, PreachRequest,
    RectifyRequest, RectifyResponse, SermonContinueResponse, SermonResponse,
};

// Continue-mode needs enough prior text to pick the thread back up
const MIN_CONTINUATION_CHARS: usize = 50;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ResponseGenerator>,
    pub started_at: Instant,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/chat", post(chat))
        .route("/api/rectify", post(rectify))
        .route("/api/preach", post(preach))
        .route("/api/lesson", post(lesson))
        .with_state(state)
}

// ===== HEALTH CHECK =====

async fn health(State(state): State<AppState>) -> Response {
    Json(json!({
        "success": true,
        "status": "OK",
        "service": "WOFA AI Backend (Groq)",
        "uptime": state.started_at.elapsed().as_secs(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}

// ===== AI CHAT ENDPOINT =====

async fn chat(State(state): State<AppState>, Json(payload): Json<ChatRequest>) -> Response {
    let question = payload.question.as_deref().unwrap_or("").trim();

    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiMessage::fail("Question is required.")),
        )
            .into_response();
    }

    if payload.image.is_some() {
        println!("| 🖼️  Image attached (vision handled separately, ignoring)");
    }

    let course = payload.course.as_deref().unwrap_or("");
    let lesson = payload.lesson.as_deref().unwrap_or("");
    let platform = payload.platform.as_deref().unwrap_or("");

    let result = state
        .generator
        .generate(question, course, lesson, platform)
        .await;

    Json(ChatResponse {
        success: true,
        answer: result.into_text(),
        platform: if platform.is_empty() {
            "general".to_string()
        } else {
            platform.to_string()
        },
    })
    .into_response()
}

// ===== RECTIFICATION ENDPOINT =====

async fn rectify(State(state): State<AppState>, Json(payload): Json<RectifyRequest>) -> Response {
    let text = payload.text.as_deref().unwrap_or("").trim();

    if text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiMessage::fail("Text is required.")),
        )
            .into_response();
    }

    let platform = payload.platform.as_deref().unwrap_or("");
    let question = build_rectify_question(text);

    let result = state
        .generator
        .generate(&question, "Rectification Mode", "Grammar Correction", platform)
        .await;

    Json(RectifyResponse {
        success: true,
        corrected: result.into_text(),
    })
    .into_response()
}

// ===== SERMON ENDPOINT =====

async fn preach(State(state): State<AppState>, Json(payload): Json<PreachRequest>) -> Response {
    let topic = payload.topic.as_deref().unwrap_or("").trim();

    if topic.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiMessage::fail("Topic is required.")),
        )
            .into_response();
    }

    let profile = profile_for(Mode::Preaching);

    if payload.mode.as_deref() == Some("continue") {
        let previous = payload.previous_text.as_deref().unwrap_or("").trim();

        if previous.chars().count() < MIN_CONTINUATION_CHARS {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiMessage::fail(
                    "previousText of at least 50 characters is required to continue a sermon.",
                )),
            )
                .into_response();
        }

        let prompt = build_sermon_continuation(topic, previous);
        let result = state
            .generator
            .complete_raw(profile.system_prompt, &prompt, &profile)
            .await;

        return Json(SermonContinueResponse {
            success: true,
            preaching_script: result.into_text(),
        })
        .into_response();
    }

    // New sermon: the model must return a parseable document; a text
    // fallback cannot render a sermon UI, so failures here are 500s.
    let prompt = build_sermon_request(topic);
    let result = state
        .generator
        .complete_raw(SERMON_SYSTEM_PROMPT, &prompt, &profile)
        .await;

    let raw = match result {
        GenerationResult::Answer(text) => text,
        GenerationResult::Fallback(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiMessage::fail("Sermon generation failed. Please try again.")),
            )
                .into_response();
        }
    };

    match parse_sermon(&raw) {
        Ok(document) => Json(SermonResponse {
            success: true,
            title: document.title,
            definition: document.definition,
            teaching_outline: document.teaching_outline,
            teaching_script: document.teaching_script,
            preaching_script: document.preaching_script,
        })
        .into_response(),
        Err(e) => {
            eprintln!("❌ Sermon parse failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiMessage::fail("Could not parse sermon response.")),
            )
                .into_response()
        }
    }
}

// ===== LESSON CONTENT ENDPOINT =====

async fn lesson(State(state): State<AppState>, Json(payload): Json<LessonRequest>) -> Response {
    let title = payload.title.as_deref().unwrap_or("").trim();

    if title.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiMessage::fail("Lesson title is required.")),
        )
            .into_response();
    }

    let objective = payload.objective.as_deref().unwrap_or("");
    let level = payload.level.as_deref().unwrap_or("Beginner");

    let profile = profile_for(Mode::General);
    let prompt = build_lesson_prompt(title, objective, level);

    let result = state
        .generator
        .complete_raw(LESSON_SYSTEM_PROMPT, &prompt, &profile)
        .await;

    Json(LessonResponse {
        success: true,
        lesson: result.into_text(),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiError, CompletionBackend, CompletionRequest};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::time::Duration;

    struct StubBackend {
        reply: String,
        seen: std::sync::Mutex<Vec<CompletionRequest>>,
    }

    impl StubBackend {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                seen: std::sync::Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }
    }

    fn state_for(backend: Arc<StubBackend>) -> AppState {
        AppState {
            generator: Arc::new(ResponseGenerator::new(backend, Duration::from_secs(5))),
            started_at: Instant::now(),
        }
    }

    fn state_with_reply(reply: &str) -> AppState {
        state_for(StubBackend::new(reply))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_requires_question() {
        let state = state_with_reply("unused");
        let payload = ChatRequest {
            question: Some("   ".to_string()),
            course: None,
            lesson: None,
            platform: None,
            image: None,
        };

        let response = chat(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Question is required.");
    }

    #[tokio::test]
    async fn test_chat_grammar_question_end_to_end() {
        let backend = StubBackend::new("I went to the market yesterday.");
        let state = state_for(backend.clone());
        let payload = ChatRequest {
            question: Some("fix this grammar: i go to market yesterday".to_string()),
            course: None,
            lesson: None,
            platform: None,
            image: None,
        };

        let response = chat(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert!(!body["answer"].as_str().unwrap().is_empty());
        assert_eq!(body["platform"], "general");

        // The grammar question must have selected the correction persona
        let seen = backend.seen.lock().unwrap();
        assert_eq!(
            seen[0].system_prompt,
            profile_for(Mode::Rectify).system_prompt
        );
    }

    #[tokio::test]
    async fn test_chat_echoes_platform() {
        let state = state_with_reply("Answer.");
        let payload = ChatRequest {
            question: Some("what is gravity".to_string()),
            course: None,
            lesson: None,
            platform: Some("ai-kasa-app".to_string()),
            image: None,
        };

        let response = chat(State(state), Json(payload)).await;
        let body = body_json(response).await;
        assert_eq!(body["platform"], "ai-kasa-app");
    }

    #[tokio::test]
    async fn test_rectify_requires_text() {
        let state = state_with_reply("unused");
        let payload = RectifyRequest {
            text: None,
            platform: None,
        };

        let response = rectify(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rectify_returns_corrected_text() {
        let state = state_with_reply("I went to the market yesterday.");
        let payload = RectifyRequest {
            text: Some("i go to market yesterday".to_string()),
            platform: None,
        };

        let response = rectify(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["corrected"], "I went to the market yesterday.");
    }

    #[tokio::test]
    async fn test_preach_requires_topic() {
        let state = state_with_reply("unused");
        let payload = PreachRequest {
            topic: None,
            mode: None,
            previous_text: None,
        };

        let response = preach(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preach_continue_requires_previous_text() {
        let state = state_with_reply("unused");
        let payload = PreachRequest {
            topic: Some("faith".to_string()),
            mode: Some("continue".to_string()),
            previous_text: None,
        };

        let response = preach(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("previousText"));
    }

    #[tokio::test]
    async fn test_preach_continue_returns_script() {
        let state = state_with_reply("And so, beloved, we press on...");
        let previous = "a".repeat(60);
        let payload = PreachRequest {
            topic: Some("faith".to_string()),
            mode: Some("continue".to_string()),
            previous_text: Some(previous),
        };

        let response = preach(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["preachingScript"], "And so, beloved, we press on...");
    }

    #[tokio::test]
    async fn test_preach_new_pads_outline() {
        let sermon = r#"{
            "title": "Walking in Faith",
            "definition": "Faith is trusting God.",
            "teachingOutline": ["point one", "point two"],
            "teachingScript": "Teach...",
            "preachingScript": "Preach..."
        }"#;
        let state = state_with_reply(sermon);
        let payload = PreachRequest {
            topic: Some("faith".to_string()),
            mode: Some("new".to_string()),
            previous_text: None,
        };

        let response = preach(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["title"], "Walking in Faith");
        assert_eq!(body["teachingOutline"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_preach_new_unparseable_is_500() {
        let state = state_with_reply("sorry, I cannot write that sermon");
        let payload = PreachRequest {
            topic: Some("faith".to_string()),
            mode: None,
            previous_text: None,
        };

        let response = preach(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_lesson_requires_title() {
        let state = state_with_reply("unused");
        let payload = LessonRequest {
            title: Some("".to_string()),
            objective: None,
            level: None,
        };

        let response = lesson(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_lesson_returns_content() {
        let state = state_with_reply("1. Introduction\nFractions are...");
        let payload = LessonRequest {
            title: Some("Fractions".to_string()),
            objective: None,
            level: None,
        };

        let response = lesson(State(state), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert!(body["lesson"].as_str().unwrap().contains("Fractions"));
    }
}
