use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

use super::parsing::{extract_groq_text, truncate_for_log, GroqResponse};
use super::prompts::{build_context, profile_for, ModeProfile};
use super::{GROQ_API_URL, GROQ_MODEL};
use crate::classifier::classify;

// Sentinel texts. The error fallback is built separately so it can carry the
// truncated failure reason; it always starts with the ⚠️ marker.
const NO_QUESTION_SENTINEL: &str = "No question provided.";
const NO_RESPONSE_SENTINEL: &str = "No response generated. Please try again.";

// ===== ERRORS =====

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set in .env")]
    MissingVar(&'static str),
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("upstream returned no usable text")]
    EmptyOutput,
}

// ===== TIMEOUT WRAPPER =====

/// Race an upstream call against a deadline. Whichever settles first wins;
/// the losing future is dropped. Expiry maps to [`AiError::Timeout`] so
/// callers can tell a hang from an upstream rejection.
pub async fn with_deadline<T>(
    operation: impl Future<Output = Result<T, AiError>>,
    deadline: Duration,
) -> Result<T, AiError> {
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => Err(AiError::Timeout(deadline)),
    }
}

// ===== COMPLETION BACKEND =====

/// One upstream text-completion call, already shaped per mode.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The upstream text-completion capability. Implemented by the Groq client
/// in production and by stubs in tests.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError>;
}

/// Groq chat-completions client. Constructed once at startup and shared for
/// the process lifetime; `reqwest::Client` pools connections internally.
pub struct GroqBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqBackend {
    /// Read configuration from the environment. Fails with a descriptive
    /// error instead of exiting - the hosting shell decides what to do.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            std::env::var("GROQ_API_KEY").map_err(|_| ConfigError::MissingVar("GROQ_API_KEY"))?;
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| GROQ_MODEL.to_string());

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl CompletionBackend for GroqBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        println!("│ 🔄 Model    : {}", self.model);

        let request_body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_prompt}
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens
        });

        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiError::Upstream(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AiError::Upstream(format!(
                "status {}: {}",
                status,
                truncate_for_log(&error_text, 60)
            )));
        }

        let groq_response: GroqResponse = response
            .json()
            .await
            .map_err(|e| AiError::Upstream(format!("failed to deserialize: {}", e)))?;

        extract_groq_text(&groq_response)
    }
}

// ===== RESPONSE GENERATOR =====

/// Outcome of one generation: a real answer, or a user-safe fallback text.
/// Upstream failures never escape this boundary as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Answer(String),
    Fallback(String),
}

impl GenerationResult {
    pub fn as_text(&self) -> &str {
        match self {
            GenerationResult::Answer(text) | GenerationResult::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            GenerationResult::Answer(text) | GenerationResult::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GenerationResult::Fallback(_))
    }
}

/// Orchestrates classify -> profile -> upstream call -> normalize.
/// Every HTTP endpoint goes through here.
pub struct ResponseGenerator {
    backend: Arc<dyn CompletionBackend>,
    deadline: Duration,
}

impl ResponseGenerator {
    pub fn new(backend: Arc<dyn CompletionBackend>, deadline: Duration) -> Self {
        Self { backend, deadline }
    }

    /// Main entry point for chat-style requests.
    pub async fn generate(
        &self,
        question: &str,
        course: &str,
        lesson: &str,
        platform: &str,
    ) -> GenerationResult {
        let question = question.trim();
        if question.is_empty() {
            // Reject before touching the classifier or the upstream
            return GenerationResult::Fallback(NO_QUESTION_SENTINEL.to_string());
        }

        let mode = classify(platform, course, lesson, question);
        let profile = profile_for(mode);

        println!("\x1b[1;30m┌── 🤖 AI PROCESSING ──────────────────────────\x1b[0m");
        println!("│ 📝 Question : \x1b[36m\"{}\"\x1b[0m", truncate_for_log(question, 60));
        println!(
            "│ 🎭 Mode     : {:?} (temp {}, max {} tokens)",
            mode, profile.temperature, profile.max_tokens
        );

        let context = build_context(platform, course, lesson);
        let user_prompt = format!("{}\nUser Question: {}", context, question);

        let request = CompletionRequest {
            system_prompt: profile.system_prompt.to_string(),
            user_prompt,
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
        };

        self.run(request).await
    }

    /// For endpoints that bring their own prompts (sermon, lesson content)
    /// but want the same timeout, normalization, and fallback handling.
    pub async fn complete_raw(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        profile: &ModeProfile,
    ) -> GenerationResult {
        println!("\x1b[1;30m┌── 🤖 AI PROCESSING ──────────────────────────\x1b[0m");
        println!("│ 📝 Prompt   : \x1b[36m\"{}\"\x1b[0m", truncate_for_log(user_prompt, 60));

        let request = CompletionRequest {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
        };

        self.run(request).await
    }

    async fn run(&self, request: CompletionRequest) -> GenerationResult {
        let started = Instant::now();

        let result = with_deadline(self.backend.complete(&request), self.deadline).await;

        let outcome = match result {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    println!("│ ⚠️  Result   : upstream returned empty content");
                    GenerationResult::Fallback(NO_RESPONSE_SENTINEL.to_string())
                } else {
                    println!(
                        "│ \x1b[32m✅ SUCCESS\x1b[0m  : {} chars in {:.2?}",
                        trimmed.len(),
                        started.elapsed()
                    );
                    GenerationResult::Answer(trimmed.to_string())
                }
            }
            Err(AiError::EmptyOutput) => {
                println!("│ ⚠️  Result   : upstream returned no usable text");
                GenerationResult::Fallback(NO_RESPONSE_SENTINEL.to_string())
            }
            Err(e) => {
                eprintln!("│ \x1b[31m❌ ERROR\x1b[0m    : {}", e);
                GenerationResult::Fallback(format!(
                    "⚠️ AI request failed: {}",
                    truncate_for_log(&e.to_string(), 120)
                ))
            }
        };

        println!("\x1b[1;30m└──────────────────────────────────────────────\x1b[0m");
        outcome
    }
}
