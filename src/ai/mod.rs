mod generator;
mod parsing;
mod prompts;

use std::time::Duration;

// ===== MODEL CONFIGURATION =====

// Groq chat model (fixed per deployment, overridable with GROQ_MODEL).
// llama-3.3-70b: 128K context, fast enough for interactive tutoring.
pub const GROQ_MODEL: &str = "llama-3.3-70b-versatile";

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

// Single deadline for every upstream call. Generous because preaching-mode
// answers run long; a request past this point is abandoned, not retried.
pub const UPSTREAM_DEADLINE: Duration = Duration::from_secs(90);

// A sermon outline always has exactly this many points.
pub const SERMON_OUTLINE_LEN: usize = 10;

// ===== PUBLIC API =====

pub use generator::{
    with_deadline, AiError, CompletionBackend, CompletionRequest, ConfigError, GenerationResult,
    GroqBackend, ResponseGenerator,
};
pub use parsing::{parse_sermon, recover_json, truncate_for_log, SermonParseError};
pub use prompts::{
    build_lesson_prompt, build_rectify_question, build_sermon_continuation, build_sermon_request,
    profile_for, ModeProfile, LESSON_SYSTEM_PROMPT, SERMON_SYSTEM_PROMPT,
};
