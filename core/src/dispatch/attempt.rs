use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::Provider;
use crate::error::{AttemptError, DispatchError};

/// Fallback text for a 2xx response that lacks `choices[0].message.content`.
const NO_OUTPUT: &str = "No output";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

/// One bounded-time completion attempt. The seam between the retry
/// controller and the wire; tests substitute scripted transports here.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Perform exactly one attempt against `provider`. The implementation
    /// must abort at `timeout_seconds`, not merely report lateness.
    async fn complete(
        &self,
        provider: &Provider,
        prompt: &str,
        timeout_seconds: u64,
    ) -> Result<String, AttemptError>;
}

/// The real transport: a chat-completions POST with bearer auth.
pub struct HttpCompletionClient {
    http: reqwest::Client,
}

impl HttpCompletionClient {
    pub fn new() -> Result<Self, DispatchError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| DispatchError::Config(format!("http client: {e}")))?;
        Ok(Self { http })
    }

    async fn send_once(&self, provider: &Provider, prompt: &str) -> Result<String, AttemptError> {
        let body = ChatRequest {
            model: &provider.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let mut req = self.http.post(&provider.endpoint).json(&body);
        if !provider.api_key.trim().is_empty() {
            req = req.bearer_auth(&provider.api_key);
        }

        let resp = req.send().await.map_err(AttemptError::from_reqwest)?;
        let status = resp.status();

        if !status.is_success() {
            return Err(AttemptError::HttpStatus {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| AttemptError::Parse(e.to_string()))?;

        Ok(extract_content(&body))
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        provider: &Provider,
        prompt: &str,
        timeout_seconds: u64,
    ) -> Result<String, AttemptError> {
        let attempt = self.send_once(provider, prompt);
        match tokio::time::timeout(Duration::from_secs(timeout_seconds), attempt).await {
            Ok(result) => result,
            // Dropping the request future tears down the in-flight call.
            Err(_) => Err(AttemptError::Timeout(timeout_seconds)),
        }
    }
}

fn extract_content(body: &Value) -> String {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| NO_OUTPUT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    fn provider(endpoint: String) -> Provider {
        Provider {
            id: "p1".to_string(),
            name: "test".to_string(),
            endpoint,
            api_key: "secret".to_string(),
            model: "test-model".to_string(),
        }
    }

    #[test]
    fn test_extract_content() {
        let body = json!({"choices": [{"message": {"content": "hi"}}]});
        assert_eq!(extract_content(&body), "hi");
    }

    #[test]
    fn test_extract_content_missing_path() {
        assert_eq!(extract_content(&json!({"choices": []})), "No output");
        assert_eq!(extract_content(&json!({})), "No output");
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer secret")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"Kyoto is lovely."}}]}"#)
            .create_async()
            .await;

        let client = HttpCompletionClient::new().unwrap();
        let provider = provider(format!("{}/v1/chat/completions", server.url()));
        let text = client.complete(&provider, "Describe Kyoto", 5).await.unwrap();

        assert_eq!(text, "Kyoto is lovely.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_sends_chat_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(mockito::Matcher::Json(json!({
                "model": "test-model",
                "messages": [{"role": "user", "content": "Describe Kyoto"}],
                "stream": false
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"ok"}}]}"#)
            .create_async()
            .await;

        let client = HttpCompletionClient::new().unwrap();
        let provider = provider(format!("{}/v1/chat/completions", server.url()));
        client.complete(&provider, "Describe Kyoto", 5).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_no_output_fallback() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = HttpCompletionClient::new().unwrap();
        let provider = provider(format!("{}/v1/chat/completions", server.url()));
        let text = client.complete(&provider, "p", 5).await.unwrap();

        assert_eq!(text, "No output");
    }

    #[tokio::test]
    async fn test_complete_http_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = HttpCompletionClient::new().unwrap();
        let provider = provider(format!("{}/v1/chat/completions", server.url()));
        let err = client.complete(&provider, "p", 5).await.unwrap_err();

        match err {
            AttemptError::HttpStatus { status, .. } => assert_eq!(status, 500),
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_parse_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = HttpCompletionClient::new().unwrap();
        let provider = provider(format!("{}/v1/chat/completions", server.url()));
        let err = client.complete(&provider, "p", 5).await.unwrap_err();

        assert!(matches!(err, AttemptError::Parse(_)));
    }

    #[tokio::test]
    async fn test_complete_timeout_aborts_attempt() {
        // A listener that accepts and then never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hold = tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                let (socket, _) = match listener.accept().await {
                    Ok(pair) => pair,
                    Err(_) => return,
                };
                held.push(socket);
            }
        });

        let client = HttpCompletionClient::new().unwrap();
        let provider = provider(format!("http://{addr}/v1/chat/completions"));

        let started = std::time::Instant::now();
        let err = client.complete(&provider, "p", 1).await.unwrap_err();

        assert!(matches!(err, AttemptError::Timeout(1)));
        assert!(started.elapsed() < Duration::from_secs(3));
        hold.abort();
    }
}
