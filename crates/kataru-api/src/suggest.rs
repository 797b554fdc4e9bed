//! Title cleanup via an OpenAI-compatible chat completion endpoint.
//!
//! Best-effort by contract: a disabled client, a refusal, or a malformed
//! reply all come back as `Ok(None)` and the resolver carries on with what
//! it already has. Only transport failures surface as errors.

use std::time::Duration;

use kataru_core::config::SuggestConfig;
use kataru_core::error::ServiceError;
use kataru_core::traits::TitleSuggest;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You correct misspelled or abbreviated anime titles. \
Reply with only the most likely official title, nothing else. \
No punctuation around it, no explanation. \
If you cannot tell what anime is meant, reply with the input unchanged.";

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<SuggestError> for ServiceError {
    fn from(err: SuggestError) -> Self {
        match err {
            SuggestError::Http(e) => ServiceError::Transport(e.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

pub struct SuggestClient {
    enabled: bool,
    api_url: String,
    api_key: String,
    model: String,
    http: Client,
}

impl SuggestClient {
    pub fn new(config: &SuggestConfig, timeout: Duration) -> Result<Self, SuggestError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            enabled: config.enabled && !config.api_key.is_empty(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            http,
        })
    }

    pub async fn suggest_title(&self, title: &str) -> Result<Option<String>, SuggestError> {
        if !self.enabled {
            return Ok(None);
        }

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: title,
                },
            ],
            temperature: 0.0,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "suggestion endpoint error");
            return Ok(None);
        }

        let payload: ChatResponse = match response.json().await {
            Ok(p) => p,
            Err(err) => {
                warn!(error = %err, "unreadable suggestion reply");
                return Ok(None);
            }
        };

        let suggestion = payload
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|s| !s.is_empty());
        debug!(?suggestion, "title suggestion");
        Ok(suggestion)
    }
}

impl TitleSuggest for SuggestClient {
    async fn suggest(&self, title: &str) -> Result<Option<String>, ServiceError> {
        self.suggest_title(title).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, api_key: &str) -> SuggestConfig {
        SuggestConfig {
            enabled,
            api_url: "https://api.openai.com/v1".into(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".into(),
        }
    }

    #[tokio::test]
    async fn disabled_client_suggests_nothing() {
        let client = SuggestClient::new(&config(false, "key"), Duration::from_secs(1)).unwrap();
        assert_eq!(client.suggest_title("gto").await.unwrap(), None);
    }

    #[tokio::test]
    async fn enabled_without_key_suggests_nothing() {
        let client = SuggestClient::new(&config(true, ""), Duration::from_secs(1)).unwrap();
        assert_eq!(client.suggest_title("gto").await.unwrap(), None);
    }

    #[test]
    fn chat_response_deserializes() {
        let raw = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "Great Teacher Onizuka" } }
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.choices[0].message.content, "Great Teacher Onizuka");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let mut cfg = config(true, "key");
        cfg.api_url = "https://example.com/v1/".into();
        let client = SuggestClient::new(&cfg, Duration::from_secs(1)).unwrap();
        assert_eq!(client.api_url, "https://example.com/v1");
    }
}
