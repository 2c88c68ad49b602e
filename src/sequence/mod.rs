pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod safety;
pub mod types;

pub use orchestrator::{DAY_3_TO_5_GUIDANCE, SequenceOrchestrator};
pub use parser::{ParsedStage, parse_stage_response};
pub use prompt::PromptPair;
pub use safety::{FORBIDDEN_PHRASES, SafetyVerdict, screen};
pub use types::{
    FormalityMode, GeneratedContent, Objective, SequencePlan, SequenceStage, StageOutcome,
    VoiceProfile,
};
