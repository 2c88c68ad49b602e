#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod prospect;
pub mod providers;
pub mod sequence;

pub use config::GenerationConfig;
pub use error::{CadenzaError, ConfigError, GenerationError, ProviderError, Result};
pub use pipeline::{
    FollowupBuckets, FunnelStats, PipelineStatus, Transition, advance, advance_today,
    auto_advance, classify, count_by_status, funnel_stats, funnel_stats_for,
};
pub use prospect::Prospect;
pub use providers::{CompletionClient, CompletionOptions, DeadlineClient, OpenAiCompatClient};
pub use sequence::{
    FormalityMode, GeneratedContent, Objective, SequenceOrchestrator, SequencePlan, SequenceStage,
    StageOutcome, VoiceProfile,
};
