//! Score parsing.
//!
//! Games report score through freeform status text (whatever their scoreboard
//! element happens to contain). The parser is an explicit reducer over that
//! text: each labeled-number pattern that matches overrides its field, every
//! other field keeps its last known value. Nothing is ever reset implicitly.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound of the progress scale.
pub const PROGRESS_MAX: u8 = 10;

/// Structured score state owned by the host session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub correct: u32,
    pub wrong: u32,
    /// Progress through the game, in `[0, 10]`.
    pub progress: u8,
}

// Labeled-number patterns, CJK labels first with ASCII fallbacks. Generated
// games are not consistent about separators, so the label/number glue is
// loose.
static CORRECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // \b keeps "correct" from matching inside "incorrect".
    Regex::new(r"(?i)(?:正确|答对|\bcorrect)\s*[:：=]?\s*(\d+)").expect("correct pattern")
});
static WRONG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:错误|答错|\b(?:wrong|incorrect))\s*[:：=]?\s*(\d+)").expect("wrong pattern")
});
static PROGRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:进度|progress)\s*[:：=]?\s*(\d+)").expect("progress pattern")
});

impl ScoreState {
    /// Folds one `score-update` payload into the state. Pure and total:
    /// missing or malformed payloads return the previous state unchanged.
    #[must_use]
    pub fn apply(self, payload: &Value) -> ScoreState {
        let Some(text) = status_text(payload) else {
            return self;
        };

        let mut next = self;
        if let Some(n) = capture_number(&CORRECT_RE, text) {
            next.correct = n;
        }
        if let Some(n) = capture_number(&WRONG_RE, text) {
            next.wrong = n;
        }
        if let Some(n) = capture_number(&PROGRESS_RE, text) {
            next.progress = n.min(u32::from(PROGRESS_MAX)) as u8;
        }
        next
    }
}

/// The freeform status text inside a payload: either `data.text` or a bare
/// string payload.
fn status_text(payload: &Value) -> Option<&str> {
    match payload {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("text").and_then(Value::as_str),
        _ => None,
    }
}

fn capture_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
