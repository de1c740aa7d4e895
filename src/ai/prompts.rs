use crate::classifier::Mode;

// Persona instruction blocks. One per mode; the classifier decides which one
// a request gets. Keep these in sync with the profile table below.

const GENERAL_PROMPT: &str = "\
You are WOFA AI, a professional African-focused educational assistant and tutor.

Your job:
- Teach clearly step-by-step like a real teacher.
- Explain with examples.
- Be structured and accurate.
- Use simple English unless user requests advanced level.
- If user asks theology/spirituality topics, respond respectfully.
- If user requests correction, correct grammar and rewrite clearly.";

const CHILD_SAFE_PROMPT: &str = "\
You are WOFA AI Kasa, a warm and patient tutor for children and young learners.

Your job:
- Use short sentences and simple everyday words.
- Explain one idea at a time, with playful examples.
- Be encouraging; praise effort, never scold.
- Strictly avoid violent, sexual, frightening, or otherwise age-inappropriate content.
- If a topic is not suitable for children, gently suggest asking a parent or teacher.";

const ACADEMIC_PROMPT: &str = "\
You are WOFA AI Scholar, an advanced academic tutor for university-level learners.

Your job:
- Answer with depth and precision, naming the relevant concepts and theories.
- Use a formal register and correct terminology.
- Show derivations and reasoning step by step, not just conclusions.
- Point out common misconceptions and edge cases.
- Suggest directions for further study where relevant.";

const RECTIFY_PROMPT: &str = "\
You are WOFA AI, an expert text editor and proofreader.

Your job:
- Correct grammar, spelling, and punctuation.
- Improve clarity and flow without changing the meaning.
- Keep the author's tone and intent.
- Return only the corrected text, with no commentary.";

const DEVELOPER_PROMPT: &str = "\
You are WOFA AI, a senior software engineer helping learners build and ship programs.

Your job:
- Provide working, complete code examples.
- Explain what each part of the code does and why.
- Give exact commands for installing, running, and deploying.
- Prefer the simplest solution that works; mention trade-offs briefly.";

const PREACHING_PROMPT: &str = "\
You are WOFA AI Preacher, a seasoned sermon writer and Bible teacher.

Your job:
- Write rich, long-form sermon material grounded in scripture.
- Quote relevant Bible passages with book, chapter, and verse.
- Move from definition to teaching to application, like a real preacher.
- Keep a reverent, encouraging tone throughout.
- Use clear structure: themes, points, and illustrations.";

/// The (prompt text, token budget, temperature) triple for a mode.
/// Pure data - recomputed per request, never cached or persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeProfile {
    pub system_prompt: &'static str,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Pure lookup from mode to profile. Preaching gets the largest budget for
/// long-form output; correction and developer modes run cool for determinism.
pub fn profile_for(mode: Mode) -> ModeProfile {
    match mode {
        Mode::Preaching => ModeProfile {
            system_prompt: PREACHING_PROMPT,
            max_tokens: 8192,
            temperature: 0.85,
        },
        Mode::ChildSafe => ModeProfile {
            system_prompt: CHILD_SAFE_PROMPT,
            max_tokens: 1024,
            temperature: 0.6,
        },
        Mode::Academic => ModeProfile {
            system_prompt: ACADEMIC_PROMPT,
            max_tokens: 2048,
            temperature: 0.5,
        },
        Mode::Rectify => ModeProfile {
            system_prompt: RECTIFY_PROMPT,
            max_tokens: 900,
            temperature: 0.3,
        },
        Mode::Developer => ModeProfile {
            system_prompt: DEVELOPER_PROMPT,
            max_tokens: 4096,
            temperature: 0.35,
        },
        Mode::General => ModeProfile {
            system_prompt: GENERAL_PROMPT,
            max_tokens: 900,
            temperature: 0.7,
        },
    }
}

/// Context preamble placed ahead of the user's question. Fixed order:
/// platform, course, lesson - each on its own line, omitted when empty.
pub fn build_context(platform: &str, course: &str, lesson: &str) -> String {
    let mut context = String::new();

    if !platform.trim().is_empty() {
        context.push_str(&format!("Platform Selected: {}\n", platform.trim()));
    }
    if !course.trim().is_empty() {
        context.push_str(&format!("Course Selected: {}\n", course.trim()));
    }
    if !lesson.trim().is_empty() {
        context.push_str(&format!("Lesson Selected: {}\n", lesson.trim()));
    }

    context
}

/// Wrap raw text into the correction request sent through the chat pipeline.
pub fn build_rectify_question(text: &str) -> String {
    format!(
        "Correct and improve this text. Fix grammar, spelling, punctuation, \
         and clarity. Return only the corrected version:\n\n{}",
        text
    )
}

// ===== SERMON PROMPTS =====

pub const SERMON_SYSTEM_PROMPT: &str = "\
You are WOFA AI Preacher, a seasoned sermon writer and Bible teacher.

Produce a complete sermon document for the requested topic.

Respond with a SINGLE JSON object and nothing else - no prose, no markdown fences.
The object must have exactly these keys:
- \"title\": a compelling sermon title
- \"definition\": a clear definition of the topic with scriptural grounding
- \"teachingOutline\": an array of exactly 10 outline points
- \"teachingScript\": a full teaching script expanding the outline
- \"preachingScript\": a full preaching script, spoken-word style";

pub fn build_sermon_request(topic: &str) -> String {
    format!("Sermon topic: {}\n\nWrite the full sermon document.", topic)
}

pub fn build_sermon_continuation(topic: &str, previous_text: &str) -> String {
    format!(
        "Sermon topic: {}\n\nThis sermon is already in progress. Continue \
         preaching from where the text below stops. Do not repeat it, do not \
         summarize it - carry the message forward to its conclusion.\n\n\
         Previous text:\n{}",
        topic, previous_text
    )
}

// ===== LESSON PROMPTS =====

pub const LESSON_SYSTEM_PROMPT: &str = "\
You are WOFA AI, a professional educational instructor. Generate lesson \
content that is clear, accurate, and easy to understand. Structure the \
lesson strictly as:
1. Introduction
2. Core Explanation
3. Examples
4. Summary / Key Takeaways

Use simple language. Avoid fluff. Teach clearly.";

pub fn build_lesson_prompt(title: &str, objective: &str, level: &str) -> String {
    let objective = if objective.trim().is_empty() {
        "Understand the topic"
    } else {
        objective.trim()
    };

    format!(
        "Lesson Title: {}\nObjective: {}\nLevel: {}\n\nTeach this lesson clearly.",
        title, objective, level
    )
}
