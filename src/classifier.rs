// Maps an incoming request to the persona the AI should answer with.
//
// Two stages, first match wins:
//   1. Platform label override - the calling front-end knows its audience,
//      so a recognized platform keyword beats anything in the message itself.
//   2. Content keywords over the combined request text.
// Falls through to the general tutor persona.

/// Persona/behavior profile selected for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Preaching,
    ChildSafe,
    Academic,
    Rectify,
    Developer,
    General,
}

// Platform keywords are matched against the platform label only.
const PLATFORM_RULES: &[(&[&str], Mode)] = &[
    (&["preach", "pulpit", "sermon"], Mode::Preaching),
    (&["kasa", "kids", "junior", "minor"], Mode::ChildSafe),
    (&["study", "campus", "academy", "scholar"], Mode::Academic),
];

// Content keywords are matched against the whole request text, lowercased.
// Matching is plain substring containment - "decode" triggers the developer
// persona because it contains "code". Known imprecision, kept on purpose.
const CONTENT_RULES: &[(&[&str], Mode)] = &[
    (
        &["sermon", "preach", "bible", "scripture", "gospel", "devotion", "theology"],
        Mode::Preaching,
    ),
    (
        &["correct", "grammar", "rewrite", "rectify", "proofread", "spelling", "punctuation"],
        Mode::Rectify,
    ),
    (
        &["code", "program", "debug", "deploy", "javascript", "python", "rust", "api", "server"],
        Mode::Developer,
    ),
];

/// Resolve the mode for a request. Always returns a mode; missing optional
/// fields are treated as empty strings.
pub fn classify(platform: &str, course: &str, lesson: &str, question: &str) -> Mode {
    let platform_lower = platform.to_lowercase();

    for (keywords, mode) in PLATFORM_RULES {
        if keywords.iter().any(|k| platform_lower.contains(k)) {
            return *mode;
        }
    }

    let combined = format!("{} {} {} {}", platform, course, lesson, question).to_lowercase();

    for (keywords, mode) in CONTENT_RULES {
        if keywords.iter().any(|k| combined.contains(k)) {
            return *mode;
        }
    }

    Mode::General
}
