use serde::{Deserialize, Serialize};
use strum::Display;

// ─── Stages ─────────────────────────────────────────────────────────────────

/// The three LLM-generated touchpoints of an outreach sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SequenceStage {
    WarmupComment,
    FirstMessage,
    TransitionMessage,
}

impl SequenceStage {
    pub const ALL: [Self; 3] = [Self::WarmupComment, Self::FirstMessage, Self::TransitionMessage];

    /// Key the completion is asked to return its text under.
    pub fn required_key(self) -> &'static str {
        match self {
            Self::WarmupComment => "comment",
            Self::FirstMessage | Self::TransitionMessage => "message",
        }
    }
}

// ─── Objectives ─────────────────────────────────────────────────────────────

/// Business goal selected for the transition stage. Each objective alters the
/// directive block of the transition prompt; nothing else reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Objective {
    #[default]
    BuildRelationship,
    UnderstandNeeds,
    ProposeCollaboration,
    RequestCall,
    ShareResource,
}

impl Objective {
    pub const ALL: [Self; 5] = [
        Self::BuildRelationship,
        Self::UnderstandNeeds,
        Self::ProposeCollaboration,
        Self::RequestCall,
        Self::ShareResource,
    ];

    /// Lossy lookup: unknown ids fall back to the default objective instead
    /// of failing, so a stale id in stored data never breaks generation.
    pub fn from_id(id: &str) -> Self {
        let normalized = id.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "understand_needs" => Self::UnderstandNeeds,
            "propose_collaboration" => Self::ProposeCollaboration,
            "request_call" => Self::RequestCall,
            "share_resource" => Self::ShareResource,
            _ => Self::BuildRelationship,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BuildRelationship => "Build the relationship",
            Self::UnderstandNeeds => "Understand their needs",
            Self::ProposeCollaboration => "Propose a collaboration",
            Self::RequestCall => "Request a call",
            Self::ShareResource => "Share a resource",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::BuildRelationship => {
                "Keep the conversation going with no ask; trust comes before anything else."
            }
            Self::UnderstandNeeds => {
                "Learn what the prospect is working on and where they struggle, without pitching."
            }
            Self::ProposeCollaboration => {
                "Explore working together once mutual interest is established."
            }
            Self::RequestCall => "Move the conversation to a short live call.",
            Self::ShareResource => {
                "Offer a genuinely useful article, tool, or introduction with no strings attached."
            }
        }
    }

    /// Directive block consumed only by the transition-stage prompt.
    pub fn transition_directive(self) -> &'static str {
        match self {
            Self::BuildRelationship => {
                "Deepen the relationship. Ask a thoughtful follow-up question grounded in what \
                 they said earlier. Do not mention your own offering at all."
            }
            Self::UnderstandNeeds => {
                "Gently steer toward how they currently handle the area you care about. Ask what \
                 their process looks like today. Do not pitch or describe your own offering."
            }
            Self::ProposeCollaboration => {
                "Mention your own offering only if the prospect has already shown interest in the \
                 topic, and keep it to one sentence. Close with a soft call-to-action that leaves \
                 them an easy way to decline."
            }
            Self::RequestCall => {
                "Propose a short voice or video call, 15 minutes at most, and offer two concrete \
                 time windows. Make clear it is fine to say no."
            }
            Self::ShareResource => {
                "Share one specific resource relevant to what they talked about, say in one \
                 sentence why it made you think of them, and expect nothing back."
            }
        }
    }
}

// ─── Voice profile ──────────────────────────────────────────────────────────

/// How formal the generated messages should read.
///
/// The professional-network default is formal, so an absent profile and
/// `AlwaysFormal` behave identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FormalityMode {
    AlwaysInformal,
    ContextDependent,
    #[default]
    AlwaysFormal,
}

/// Stylistic knobs of the sender. Read-only input to prompt construction;
/// owned and mutated elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceProfile {
    #[serde(default)]
    pub formality: FormalityMode,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub signature_phrases: Vec<String>,
    /// Describes the sender's own offering; only the transition stage is
    /// allowed to draw on it.
    #[serde(default)]
    pub business_context: Option<String>,
}

// ─── Generated content ──────────────────────────────────────────────────────

/// Structured result of one stage generation. Ephemeral; persisted only by
/// the caller's message store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub stage: SequenceStage,
    pub text: String,
    /// Which prospect profile element the text references, when the model
    /// reported one.
    #[serde(default)]
    pub referenced_element: Option<String>,
    #[serde(default)]
    pub suggested_next_step: Option<String>,
    /// True when the completion could not be parsed and a hardcoded safe
    /// default was substituted.
    pub used_fallback: bool,
    /// True when the text matched the forbidden-phrase policy. Advisory:
    /// flagged content is surfaced for human review, never withheld.
    pub flagged: bool,
    #[serde(default)]
    pub flagged_phrases: Vec<String>,
}

// ─── Sequence plan ──────────────────────────────────────────────────────────

/// Outcome of one stage inside a full-sequence generation. Failures are
/// settled per stage so one completion hiccup never voids the other stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageOutcome {
    Generated(GeneratedContent),
    Failed { stage: SequenceStage, reason: String },
}

impl StageOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }

    pub fn content(&self) -> Option<&GeneratedContent> {
        match self {
            Self::Generated(content) => Some(content),
            Self::Failed { .. } => None,
        }
    }

    pub fn stage(&self) -> SequenceStage {
        match self {
            Self::Generated(content) => content.stage,
            Self::Failed { stage, .. } => *stage,
        }
    }
}

/// Day-indexed outreach plan produced by a full-sequence generation.
///
/// Days 3–5 carry static guidance rather than generated text: the sender is
/// expected to engage manually between the first message and the transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencePlan {
    pub day1: StageOutcome,
    pub day2: StageOutcome,
    pub day3_to_5: String,
    pub day5_plus: StageOutcome,
}

impl SequencePlan {
    pub fn stage_outcomes(&self) -> [&StageOutcome; 3] {
        [&self.day1, &self.day2, &self.day5_plus]
    }

    /// Stages whose generation failed, in day order. Empty means the plan is
    /// complete.
    pub fn failed_stages(&self) -> Vec<SequenceStage> {
        self.stage_outcomes()
            .into_iter()
            .filter(|outcome| !outcome.is_generated())
            .map(StageOutcome::stage)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failed_stages().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_serializes_snake_case() {
        let json = serde_json::to_string(&SequenceStage::WarmupComment).unwrap();
        assert_eq!(json, "\"warmup_comment\"");
        assert_eq!(SequenceStage::FirstMessage.to_string(), "first_message");
    }

    #[test]
    fn stage_required_keys() {
        assert_eq!(SequenceStage::WarmupComment.required_key(), "comment");
        assert_eq!(SequenceStage::FirstMessage.required_key(), "message");
        assert_eq!(SequenceStage::TransitionMessage.required_key(), "message");
    }

    #[test]
    fn objective_from_id_known_values() {
        assert_eq!(Objective::from_id("request_call"), Objective::RequestCall);
        assert_eq!(
            Objective::from_id("propose-collaboration"),
            Objective::ProposeCollaboration
        );
        assert_eq!(Objective::from_id("Share_Resource"), Objective::ShareResource);
    }

    #[test]
    fn objective_from_id_unknown_falls_back() {
        assert_eq!(Objective::from_id("world_domination"), Objective::BuildRelationship);
        assert_eq!(Objective::from_id(""), Objective::BuildRelationship);
    }

    #[test]
    fn every_objective_has_directive_text() {
        for objective in Objective::ALL {
            assert!(!objective.transition_directive().is_empty());
            assert!(!objective.label().is_empty());
            assert!(!objective.description().is_empty());
        }
    }

    #[test]
    fn formality_defaults_to_formal() {
        assert_eq!(FormalityMode::default(), FormalityMode::AlwaysFormal);
        let profile = VoiceProfile::default();
        assert_eq!(profile.formality, FormalityMode::AlwaysFormal);
    }

    #[test]
    fn stage_outcome_tagged_serialization() {
        let outcome = StageOutcome::Failed {
            stage: SequenceStage::TransitionMessage,
            reason: "quota exhausted".into(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"kind\":\"failed\""));
        assert!(json.contains("transition_message"));
    }

    #[test]
    fn plan_failed_stages_in_day_order() {
        let generated = GeneratedContent {
            stage: SequenceStage::FirstMessage,
            text: "hello".into(),
            referenced_element: None,
            suggested_next_step: None,
            used_fallback: false,
            flagged: false,
            flagged_phrases: vec![],
        };
        let plan = SequencePlan {
            day1: StageOutcome::Failed {
                stage: SequenceStage::WarmupComment,
                reason: "boom".into(),
            },
            day2: StageOutcome::Generated(generated),
            day3_to_5: "engage lightly".into(),
            day5_plus: StageOutcome::Failed {
                stage: SequenceStage::TransitionMessage,
                reason: "boom".into(),
            },
        };
        assert!(!plan.is_complete());
        assert_eq!(
            plan.failed_stages(),
            vec![SequenceStage::WarmupComment, SequenceStage::TransitionMessage]
        );
    }
}
