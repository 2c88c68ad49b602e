use std::time::Duration;

use cadenza::{
    CompletionClient, CompletionOptions, DeadlineClient, OpenAiCompatClient, ProviderError,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options() -> CompletionOptions {
    CompletionOptions {
        model: "gpt-4o-mini".into(),
        max_tokens: 300,
        temperature: 0.7,
    }
}

#[tokio::test]
async fn openai_adapter_round_trips_a_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"message\":\"hello\"}"}}]
        })))
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new("sk-test", Some(&server.uri()));
    let text = client
        .complete("system prompt", "user prompt", &options())
        .await
        .unwrap();
    assert_eq!(text, "{\"message\":\"hello\"}");
}

#[tokio::test]
async fn openai_adapter_surfaces_api_errors_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429).set_body_string(r#"{"error":"rate limit exceeded"}"#),
        )
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new("sk-test", Some(&server.uri()));
    let err = client
        .complete("system prompt", "user prompt", &options())
        .await
        .unwrap_err();

    let provider_err = err.downcast_ref::<ProviderError>().expect("typed error");
    assert!(matches!(
        provider_err,
        ProviderError::Status { status: 429, .. }
    ));
    assert!(err.to_string().contains("rate limit exceeded"));
}

#[tokio::test]
async fn openai_adapter_rejects_empty_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = OpenAiCompatClient::new("sk-test", Some(&server.uri()));
    let err = client
        .complete("system prompt", "user prompt", &options())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no completion text"));
}

#[tokio::test]
async fn deadline_wrapper_bounds_a_stalled_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(30))
                .set_body_json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "late"}}]
                })),
        )
        .mount(&server)
        .await;

    let client = DeadlineClient::new(
        OpenAiCompatClient::new("sk-test", Some(&server.uri())),
        Duration::from_millis(200),
    );
    let err = client
        .complete("system prompt", "user prompt", &options())
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<ProviderError>().is_some());
    assert!(err.to_string().contains("deadline"));
}
