use std::future::Future;

use log::debug;
use reqwest::Client;

use crate::{Error, Result};

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

const PROMPT_TEMPLATE: &str = "Provide a clear and concise summary (maximum 400 words)
of the following content:
{text}
";

/// Produces a summary of one chunk of text
pub trait Summarizer {
    fn summarize(&self, text: &str) -> impl Future<Output = Result<String>>;
}

/// Fill the fixed summary prompt with `text`
pub fn render_prompt(text: &str) -> String {
    PROMPT_TEMPLATE.replace("{text}", text)
}

/// Chat-completions client for Groq's OpenAI-compatible API
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: GROQ_BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Summarizer for GroqClient {
    async fn summarize(&self, text: &str) -> Result<String> {
        debug!("Summarizing {} chars via Groq with model {}", text.chars().count(), self.model);

        let body = serde_json::json!({
            "model": self.model,
            "stream": false,
            "messages": [
                {
                    "role": "user",
                    "content": render_prompt(text)
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Api { status, message });
        }

        let json: serde_json::Value = resp.json().await?;
        extract_completion_text(&json)
    }
}

fn extract_completion_text(json: &serde_json::Value) -> Result<String> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
        .map(|t| t.trim().to_string())
        .ok_or_else(|| Error::MalformedResponse("unexpected chat completion format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_render_prompt() {
        let prompt = render_prompt("Rust is a systems language.");
        assert!(prompt.contains("maximum 400 words"));
        assert!(prompt.ends_with("of the following content:\nRust is a systems language.\n"));
    }

    #[test]
    fn test_extract_completion_text() {
        let json = serde_json::json!({
            "choices": [
                {
                    "message": {
                        "role": "assistant",
                        "content": "  Summary of the page.\n"
                    }
                }
            ]
        });
        assert_eq!(extract_completion_text(&json).unwrap(), "Summary of the page.");
    }

    #[test]
    fn test_extract_completion_text_empty() {
        let json = serde_json::json!({"choices": []});
        assert!(matches!(extract_completion_text(&json), Err(Error::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_summarize_sends_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(bearer_token("gsk_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "A summary."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GroqClient::new("gsk_test", DEFAULT_MODEL).with_base_url(server.uri());
        let summary = client.summarize("some chunk").await.unwrap();
        assert_eq!(summary, "A summary.");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert!(body["messages"][0]["content"].as_str().unwrap().contains("some chunk"));
    }

    #[tokio::test]
    async fn test_summarize_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = GroqClient::new("bad", DEFAULT_MODEL).with_base_url(server.uri());
        let err = client.summarize("chunk").await.unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
