use thiserror::Error;

use crate::sequence::SequenceStage;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `cadenza`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal provider plumbing continues to
/// use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum CadenzaError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Sequence generation ─────────────────────────────────────────────
    #[error("generation: {0}")]
    Generation(#[from] GenerationError),

    // ── Completion provider ─────────────────────────────────────────────
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Sequence generation errors ─────────────────────────────────────────────

/// The completion call behind a stage failed. Parse degradation and safety
/// flags are not errors; they surface as flags on the generated content.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("sequence generation failed for {stage}: {message}")]
    Completion {
        stage: SequenceStage,
        message: String,
    },
}

impl GenerationError {
    /// Which stage the failure belongs to, so callers can retry just that
    /// stage.
    pub fn stage(&self) -> SequenceStage {
        match self {
            Self::Completion { stage, .. } => *stage,
        }
    }
}

// ─── Completion provider errors ─────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} returned {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("completion call exceeded {seconds}s deadline")]
    Deadline { seconds: u64 },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, CadenzaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = CadenzaError::Config(ConfigError::Validation("temperature out of range".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn generation_error_names_the_stage() {
        let err = GenerationError::Completion {
            stage: SequenceStage::FirstMessage,
            message: "connection reset".into(),
        };
        assert!(err.to_string().contains("first_message"));
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(err.stage(), SequenceStage::FirstMessage);
    }

    #[test]
    fn provider_deadline_displays_seconds() {
        let err = CadenzaError::Provider(ProviderError::Deadline { seconds: 30 });
        assert!(err.to_string().contains("30s"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let err: CadenzaError = anyhow_err.into();
        assert!(err.to_string().contains("something went wrong"));
    }
}
