use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;

use super::traits::{CompletionClient, CompletionOptions};

/// Bounds every completion call of the wrapped client with a deadline.
///
/// A hung external call must not hang a sequence fan-out indefinitely; an
/// elapsed deadline surfaces as [`ProviderError::Deadline`]. Once the
/// deadline fires the in-flight future is dropped; there is no finer-grained
/// cancellation.
pub struct DeadlineClient<C> {
    inner: C,
    deadline: Duration,
}

impl<C> DeadlineClient<C> {
    pub fn new(inner: C, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for DeadlineClient<C> {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> anyhow::Result<String> {
        let call = self.inner.complete(system_prompt, user_prompt, options);
        match tokio::time::timeout(self.deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Deadline {
                seconds: self.deadline.as_secs(),
            }
            .into()),
        }
    }
}
