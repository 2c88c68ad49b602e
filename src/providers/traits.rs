use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Per-call parameters for a completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Black-box text generator boundary.
///
/// The orchestrator performs no retries: failures propagate to the caller,
/// who owns retry policy. Wrap implementations with
/// [`super::DeadlineClient`] to bound call duration.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> anyhow::Result<String>;
}
