//! Tolerant extraction of stage content from raw completion text.
//!
//! Completion output is treated as hostile with respect to formatting:
//! strict JSON first, then a targeted regex over the raw text, then a
//! hardcoded safe default. Generation never hard-fails on formatting noise;
//! degraded quality surfaces as `used_fallback`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::types::SequenceStage;

static COMMENT_RESCUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""comment"\s*:\s*"([^"]+)""#).expect("valid rescue pattern"));
static MESSAGE_RESCUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""message"\s*:\s*"([^"]+)""#).expect("valid rescue pattern"));

/// Well-formed result of parsing one stage response. Always produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStage {
    pub text: String,
    pub referenced_element: Option<String>,
    pub suggested_next_step: Option<String>,
    pub used_fallback: bool,
}

fn fallback_text(stage: SequenceStage) -> &'static str {
    match stage {
        SequenceStage::WarmupComment => {
            "Really enjoyed this post, thanks for sharing your perspective."
        }
        SequenceStage::FirstMessage => {
            "Hello! I came across your profile and found your background genuinely interesting. \
             Thanks for connecting. What first drew you to your current line of work?"
        }
        SequenceStage::TransitionMessage => {
            "I've really enjoyed the conversation so far. Would you be open to continuing it \
             later this week?"
        }
    }
}

fn non_empty(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn rescue(stage: SequenceStage, raw: &str) -> Option<String> {
    let pattern = match stage.required_key() {
        "comment" => &*COMMENT_RESCUE,
        _ => &*MESSAGE_RESCUE,
    };
    pattern
        .captures(raw)
        .map(|captures| captures[1].trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Extract a stage result from raw completion text.
///
/// An empty required key counts as a parse failure and falls through to the
/// regex rescue, then to the stage's hardcoded default.
pub fn parse_stage_response(stage: SequenceStage, raw: &str) -> ParsedStage {
    if let Ok(value) = serde_json::from_str::<Value>(raw.trim())
        && let Some(text) = non_empty(&value, stage.required_key())
    {
        return ParsedStage {
            text,
            referenced_element: non_empty(&value, "referenced_element"),
            suggested_next_step: non_empty(&value, "suggested_next_step"),
            used_fallback: false,
        };
    }

    if let Some(text) = rescue(stage, raw) {
        tracing::debug!(stage = %stage, "strict parse failed, rescued via targeted extraction");
        return ParsedStage {
            text,
            referenced_element: None,
            suggested_next_step: None,
            used_fallback: false,
        };
    }

    tracing::warn!(stage = %stage, "unparseable completion, substituting fallback text");
    ParsedStage {
        text: fallback_text(stage).to_string(),
        referenced_element: None,
        suggested_next_step: None,
        used_fallback: true,
    }
}
