use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

use super::api_error;
use super::traits::{CompletionClient, CompletionOptions};

/// OpenAI-compatible chat-completions adapter. Works against the official
/// endpoint and self-hosted gateways that speak the same wire format.
pub struct OpenAiCompatClient {
    base_url: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiCompatClient {
    pub fn new(api_key: impl Into<String>, base_url: Option<&str>) -> Self {
        Self {
            base_url: base_url
                .unwrap_or("https://api.openai.com/v1")
                .trim_end_matches('/')
                .to_string(),
            api_key: api_key.into(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .pool_max_idle_per_host(10)
                .pool_idle_timeout(std::time::Duration::from_secs(90))
                .tcp_keepalive(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn build_request(
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> ChatRequest {
        ChatRequest {
            model: options.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user",
                    content: user_prompt.to_string(),
                },
            ],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        }
    }

    async fn call_api(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> anyhow::Result<ChatResponse> {
        let request = Self::build_request(system_prompt, user_prompt, options);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Request {
                provider: "openai".into(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(api_error("openai", response).await.into());
        }

        response.json().await.map_err(anyhow::Error::msg)
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> anyhow::Result<String> {
        let chat_response = self.call_api(system_prompt, user_prompt, options).await?;
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        match content {
            Some(text) if !text.is_empty() => Ok(text),
            _ => anyhow::bail!("openai response contained no completion text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CompletionOptions {
        CompletionOptions {
            model: "gpt-4o-mini".into(),
            max_tokens: 300,
            temperature: 0.7,
        }
    }

    #[test]
    fn default_url() {
        let client = OpenAiCompatClient::new("sk-test", None);
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn custom_url_trailing_slash() {
        let client = OpenAiCompatClient::new("sk-test", Some("http://gateway:8080/v1/"));
        assert_eq!(client.base_url, "http://gateway:8080/v1");
    }

    #[test]
    fn request_serializes_system_and_user_roles() {
        let request = OpenAiCompatClient::build_request("be brief", "write a comment", &options());
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"max_tokens\":300"));
        assert!(json.contains("\"temperature\":0.7"));
        assert!(json.contains("gpt-4o-mini"));
    }

    #[test]
    fn response_deserializes() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("Hello!")
        );
    }

    #[test]
    fn response_with_null_content_deserializes() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn response_with_no_choices_deserializes() {
        let json = r#"{"choices":[]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices.is_empty());
    }
}
