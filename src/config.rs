use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::providers::CompletionOptions;
use crate::sequence::SequenceStage;

// ─── Generation config ──────────────────────────────────────────────────────

/// Sampling parameters for one stage's completion call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Per-stage sampling table. Warmup comments run hotter than messages; the
/// transition stage gets the largest output budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageParams {
    #[serde(default = "default_warmup_params")]
    pub warmup_comment: SamplingParams,
    #[serde(default = "default_first_message_params")]
    pub first_message: SamplingParams,
    #[serde(default = "default_transition_params")]
    pub transition_message: SamplingParams,
}

/// Which stages get the forbidden-phrase screen. Defaults to the first
/// message only; the transition stage is allowed to mention the sender's
/// offering under some objectives, so screening it is an opt-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyConfig {
    #[serde(default = "default_checked_stages")]
    pub checked_stages: Vec<SequenceStage>,
}

impl SafetyConfig {
    pub fn checks(&self, stage: SequenceStage) -> bool {
        self.checked_stages.contains(&stage)
    }
}

/// Configuration for sequence generation. serde-loadable; every field has a
/// sensible default so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Deadline handed to [`crate::providers::DeadlineClient`] by callers
    /// that wrap their completion client.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub stages: StageParams,
    #[serde(default)]
    pub safety: SafetyConfig,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_warmup_params() -> SamplingParams {
    SamplingParams {
        temperature: 0.8,
        max_tokens: 200,
    }
}

fn default_first_message_params() -> SamplingParams {
    SamplingParams {
        temperature: 0.7,
        max_tokens: 300,
    }
}

fn default_transition_params() -> SamplingParams {
    SamplingParams {
        temperature: 0.7,
        max_tokens: 350,
    }
}

fn default_checked_stages() -> Vec<SequenceStage> {
    vec![SequenceStage::FirstMessage]
}

impl Default for StageParams {
    fn default() -> Self {
        Self {
            warmup_comment: default_warmup_params(),
            first_message: default_first_message_params(),
            transition_message: default_transition_params(),
        }
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            checked_stages: default_checked_stages(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            request_timeout_secs: default_request_timeout_secs(),
            stages: StageParams::default(),
            safety: SafetyConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Load and validate a config from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".into()));
        }
        for (stage, params) in [
            (SequenceStage::WarmupComment, self.stages.warmup_comment),
            (SequenceStage::FirstMessage, self.stages.first_message),
            (
                SequenceStage::TransitionMessage,
                self.stages.transition_message,
            ),
        ] {
            if !(0.0..=2.0).contains(&params.temperature) {
                return Err(ConfigError::Validation(format!(
                    "temperature for {stage} must be within 0.0..=2.0"
                )));
            }
            if params.max_tokens == 0 {
                return Err(ConfigError::Validation(format!(
                    "max_tokens for {stage} must be positive"
                )));
            }
        }
        Ok(())
    }

    pub fn sampling_for(&self, stage: SequenceStage) -> SamplingParams {
        match stage {
            SequenceStage::WarmupComment => self.stages.warmup_comment,
            SequenceStage::FirstMessage => self.stages.first_message,
            SequenceStage::TransitionMessage => self.stages.transition_message,
        }
    }

    /// Completion options for one stage's call.
    pub fn options_for(&self, stage: SequenceStage) -> CompletionOptions {
        let params = self.sampling_for(stage);
        CompletionOptions {
            model: self.model.clone(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }
}
