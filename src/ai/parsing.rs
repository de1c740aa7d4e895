use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::generator::AiError;
use super::SERMON_OUTLINE_LEN;
use crate::models::SermonDocument;

// ===== API RESPONSE STRUCTURES =====

// Groq response structure (OpenAI-compatible)
#[derive(Debug, Deserialize)]
pub(super) struct GroqResponse {
    pub choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroqChoice {
    pub message: GroqMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct GroqMessage {
    pub content: String,
}

/// Extract text from a Groq response
pub(super) fn extract_groq_text(groq_response: &GroqResponse) -> Result<String, AiError> {
    groq_response
        .choices
        .first()
        .map(|choice| choice.message.content.clone())
        .ok_or(AiError::EmptyOutput)
}

// ===== STRUCTURED-OUTPUT RECOVERY =====

/// Best-effort extraction of a JSON object from free-form model output.
///
/// First attempt is a strict parse. On failure, one retry on the substring
/// between the first `{` and the last `}` - enough to strip stray prose and
/// markdown fences around otherwise valid JSON. No bracket balancing, no
/// trailing-comma repair; anything worse than formatting noise returns None.
pub fn recover_json(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        if value.is_object() {
            return Some(value);
        }
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }

    serde_json::from_str::<Value>(&raw[start..=end])
        .ok()
        .filter(|value| value.is_object())
}

// ===== SERMON PARSING =====

#[derive(Debug, Error)]
pub enum SermonParseError {
    #[error("no JSON payload found in model output")]
    NoPayload,
    #[error("sermon document incomplete: {0}")]
    MissingFields(String),
}

const OUTLINE_PLACEHOLDER: &str = "(point to be expanded)";

/// Parse a sermon document out of raw model output.
///
/// Recovery failure and missing required fields are hard errors - the caller
/// has no text fallback that renders a sermon. A wrong-length outline is NOT
/// an error: it is coerced to exactly [`SERMON_OUTLINE_LEN`] points.
pub fn parse_sermon(raw: &str) -> Result<SermonDocument, SermonParseError> {
    let value = recover_json(raw).ok_or(SermonParseError::NoPayload)?;

    let mut document: SermonDocument =
        serde_json::from_value(value).map_err(|e| SermonParseError::MissingFields(e.to_string()))?;

    coerce_outline(&mut document.teaching_outline);
    Ok(document)
}

fn coerce_outline(outline: &mut Vec<String>) {
    outline.truncate(SERMON_OUTLINE_LEN);
    while outline.len() < SERMON_OUTLINE_LEN {
        outline.push(OUTLINE_PLACEHOLDER.to_string());
    }
}

// ===== HELPERS =====

/// Truncate text for logging
pub fn truncate_for_log(text: &str, max_len: usize) -> String {
    let clean_text = text.replace('\n', " ");
    if clean_text.len() <= max_len {
        clean_text
    } else {
        let cut: String = clean_text.chars().take(max_len).collect();
        format!("{}...", cut)
    }
}
