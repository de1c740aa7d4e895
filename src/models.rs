use serde::{Deserialize, Serialize};

// ===== REQUEST TYPES =====

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: Option<String>,
    pub course: Option<String>,
    pub lesson: Option<String>,
    pub platform: Option<String>,
    // Accepted for forward compatibility; vision analysis is handled by a
    // separate service and ignored here.
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RectifyRequest {
    pub text: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreachRequest {
    pub topic: Option<String>,
    /// "new" (default) or "continue"
    pub mode: Option<String>,
    #[serde(rename = "previousText")]
    pub previous_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LessonRequest {
    pub title: Option<String>,
    pub objective: Option<String>,
    pub level: Option<String>,
}

// ===== RESPONSE TYPES =====

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub answer: String,
    pub platform: String,
}

#[derive(Debug, Serialize)]
pub struct RectifyResponse {
    pub success: bool,
    pub corrected: String,
}

#[derive(Debug, Serialize)]
pub struct LessonResponse {
    pub success: bool,
    pub lesson: String,
}

#[derive(Debug, Serialize)]
pub struct SermonResponse {
    pub success: bool,
    pub title: String,
    pub definition: String,
    #[serde(rename = "teachingOutline")]
    pub teaching_outline: Vec<String>,
    #[serde(rename = "teachingScript")]
    pub teaching_script: String,
    #[serde(rename = "preachingScript")]
    pub preaching_script: String,
}

#[derive(Debug, Serialize)]
pub struct SermonContinueResponse {
    pub success: bool,
    #[serde(rename = "preachingScript")]
    pub preaching_script: String,
}

/// Generic `{success, message}` body for 400/500 responses.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn fail(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

// ===== SERMON DOCUMENT =====

/// Structured sermon payload recovered from model output.
/// `teaching_outline` is coerced to exactly [`crate::ai::SERMON_OUTLINE_LEN`]
/// items after parsing; the scalar fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SermonDocument {
    pub title: String,
    pub definition: String,
    #[serde(rename = "teachingOutline", default)]
    pub teaching_outline: Vec<String>,
    #[serde(rename = "teachingScript")]
    pub teaching_script: String,
    #[serde(rename = "preachingScript")]
    pub preaching_script: String,
}
