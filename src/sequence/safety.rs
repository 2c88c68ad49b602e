//! Forbidden-phrase screening for outbound messages.
//!
//! Phrase matching is deliberately coarse: false positives are expected and
//! cheap, because a flag only routes the message to human review. Blocking
//! would turn them into silent generation failures.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Sales and call-to-action phrases that have no place in relationship-first
/// outreach. Matched case-insensitively as substrings.
pub const FORBIDDEN_PHRASES: &[&str] = &[
    "would you be interested",
    "let's discuss it",
    "my offer",
    "our offer",
    "our services",
    "our product",
    "book a call",
    "schedule a demo",
    "free consultation",
    "sign up",
    "pricing",
];

// "I help <target> to ...", the classic cold-pitch opener, with any target.
static PITCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bi help\b.{1,60}?\bto\b").expect("valid pitch pattern")
});

/// Result of screening one candidate message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyVerdict {
    pub flagged: bool,
    pub matches: Vec<String>,
}

impl SafetyVerdict {
    fn clean() -> Self {
        Self {
            flagged: false,
            matches: Vec::new(),
        }
    }
}

/// Scan `text` against the forbidden-phrase policy.
///
/// Flagging is advisory: the caller still returns the content, and the warn
/// log is what surfaces it for human review.
pub fn screen(text: &str) -> SafetyVerdict {
    let haystack = text.to_lowercase();
    let mut matches: Vec<String> = FORBIDDEN_PHRASES
        .iter()
        .copied()
        .filter(|phrase| haystack.contains(phrase))
        .map(ToString::to_string)
        .collect();
    if let Some(found) = PITCH_PATTERN.find(text) {
        matches.push(found.as_str().to_lowercase());
    }

    if matches.is_empty() {
        return SafetyVerdict::clean();
    }
    tracing::warn!(
        matches = ?matches,
        "generated message matched forbidden-phrase policy; surfacing for human review"
    );
    SafetyVerdict {
        flagged: true,
        matches,
    }
}
