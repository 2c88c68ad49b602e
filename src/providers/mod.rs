pub mod deadline;
pub mod openai;
pub mod traits;

pub use deadline::DeadlineClient;
pub use openai::OpenAiCompatClient;
pub use traits::{CompletionClient, CompletionOptions};

const MAX_API_ERROR_CHARS: usize = 200;

/// Turn a non-success HTTP response into a typed provider error with a
/// truncated body, so quota/policy diagnostics survive without dragging a
/// whole HTML error page into logs.
pub(crate) async fn api_error(
    provider: &str,
    response: reqwest::Response,
) -> crate::error::ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let truncated: String = body.chars().take(MAX_API_ERROR_CHARS).collect();
    crate::error::ProviderError::Status {
        provider: provider.to_string(),
        status,
        body: truncated,
    }
}
