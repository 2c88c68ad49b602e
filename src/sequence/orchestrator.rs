use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::prospect::Prospect;
use crate::providers::CompletionClient;

use super::parser;
use super::prompt;
use super::safety;
use super::types::{
    GeneratedContent, Objective, SequencePlan, SequenceStage, StageOutcome, VoiceProfile,
};

/// Static guidance for the days between the first message and the
/// transition. Deliberately not generated: the sender engages manually here.
pub const DAY_3_TO_5_GUIDANCE: &str = "Stay visible without messaging: react to the prospect's \
posts, leave one substantial comment if they publish something new, and note anything they say \
that the transition message can build on. Do not send a follow-up message yet.";

/// Composes prompt construction, the completion client, tolerant parsing,
/// and safety screening into per-stage generation, and per-stage generation
/// into full day-by-day sequences.
pub struct SequenceOrchestrator<C> {
    client: C,
    config: GenerationConfig,
}

impl<C: CompletionClient> SequenceOrchestrator<C> {
    pub fn new(client: C, config: GenerationConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Run one stage end to end: build prompt → complete → parse → screen.
    ///
    /// Parse degradation and safety flags are carried on the result, never
    /// raised; only a failed completion call is an error, and it names the
    /// stage so callers can retry just that stage.
    pub async fn generate_stage(
        &self,
        stage: SequenceStage,
        prospect: &Prospect,
        voice: Option<&VoiceProfile>,
        objective: Objective,
        conversation: Option<&str>,
    ) -> Result<GeneratedContent, GenerationError> {
        let pair = match stage {
            SequenceStage::WarmupComment => prompt::warmup_comment(prospect, voice),
            SequenceStage::FirstMessage => prompt::first_message(prospect, voice),
            SequenceStage::TransitionMessage => {
                prompt::transition_message(prospect, voice, objective, conversation)
            }
        };
        let options = self.config.options_for(stage);
        tracing::debug!(stage = %stage, model = %options.model, "dispatching completion");

        let raw = self
            .client
            .complete(&pair.system, &pair.user, &options)
            .await
            .map_err(|e| GenerationError::Completion {
                stage,
                message: format!("{e:#}"),
            })?;

        let parsed = parser::parse_stage_response(stage, &raw);
        let (flagged, flagged_phrases) = if self.config.safety.checks(stage) {
            let verdict = safety::screen(&parsed.text);
            (verdict.flagged, verdict.matches)
        } else {
            (false, Vec::new())
        };

        Ok(GeneratedContent {
            stage,
            text: parsed.text,
            referenced_element: parsed.referenced_element,
            suggested_next_step: parsed.suggested_next_step,
            used_fallback: parsed.used_fallback,
            flagged,
            flagged_phrases,
        })
    }

    /// Day-1 public comment.
    pub async fn generate_warmup_comment(
        &self,
        prospect: &Prospect,
        voice: Option<&VoiceProfile>,
    ) -> Result<GeneratedContent, GenerationError> {
        self.generate_stage(
            SequenceStage::WarmupComment,
            prospect,
            voice,
            Objective::default(),
            None,
        )
        .await
    }

    /// Day-2 first direct message.
    pub async fn generate_first_message(
        &self,
        prospect: &Prospect,
        voice: Option<&VoiceProfile>,
    ) -> Result<GeneratedContent, GenerationError> {
        self.generate_stage(
            SequenceStage::FirstMessage,
            prospect,
            voice,
            Objective::default(),
            None,
        )
        .await
    }

    /// Day-5+ transition message for the given objective id. Unknown ids
    /// fall back to relationship building rather than failing.
    pub async fn generate_transition_message(
        &self,
        prospect: &Prospect,
        voice: Option<&VoiceProfile>,
        objective_id: &str,
        conversation: Option<&str>,
    ) -> Result<GeneratedContent, GenerationError> {
        self.generate_stage(
            SequenceStage::TransitionMessage,
            prospect,
            voice,
            Objective::from_id(objective_id),
            conversation,
        )
        .await
    }

    /// Reduced path for prospects already warmed up: first-message stage
    /// only, no pipeline interaction.
    pub async fn generate_direct_message(
        &self,
        prospect: &Prospect,
        voice: Option<&VoiceProfile>,
        objective_id: &str,
    ) -> Result<GeneratedContent, GenerationError> {
        self.generate_stage(
            SequenceStage::FirstMessage,
            prospect,
            voice,
            Objective::from_id(objective_id),
            None,
        )
        .await
    }

    /// Generate the full day-by-day plan.
    ///
    /// The three stages are independent (same static inputs, no stage reads
    /// another's output), so they run concurrently and settle per stage: one
    /// failed completion becomes a `StageOutcome::Failed` naming its stage
    /// while the other stages keep their results.
    pub async fn generate_full_sequence(
        &self,
        prospect: &Prospect,
        voice: Option<&VoiceProfile>,
        objective_id: &str,
    ) -> SequencePlan {
        let objective = Objective::from_id(objective_id);
        let (warmup, first, transition) = tokio::join!(
            self.generate_stage(SequenceStage::WarmupComment, prospect, voice, objective, None),
            self.generate_stage(SequenceStage::FirstMessage, prospect, voice, objective, None),
            self.generate_stage(
                SequenceStage::TransitionMessage,
                prospect,
                voice,
                objective,
                None
            ),
        );

        let plan = SequencePlan {
            day1: settle(warmup),
            day2: settle(first),
            day3_to_5: DAY_3_TO_5_GUIDANCE.to_string(),
            day5_plus: settle(transition),
        };
        let failed = plan.failed_stages();
        if failed.is_empty() {
            tracing::info!(
                prospect = %prospect.qualified_handle(),
                objective = %objective,
                "full sequence generated"
            );
        } else {
            tracing::warn!(
                prospect = %prospect.qualified_handle(),
                failed_stages = ?failed,
                "sequence generated with per-stage failures"
            );
        }
        plan
    }
}

fn settle(result: Result<GeneratedContent, GenerationError>) -> StageOutcome {
    match result {
        Ok(content) => StageOutcome::Generated(content),
        Err(err) => StageOutcome::Failed {
            stage: err.stage(),
            reason: err.to_string(),
        },
    }
}
