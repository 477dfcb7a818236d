//! Blocking client for OpenAI-compatible chat-completion endpoints
//! (the Hugging Face inference router by default).

use super::{LanguageModel, ModelError};
use crate::config::Config;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str =
    "https://router.huggingface.co/hf-inference/models/google/gemma-2-27b-it/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemma-2-27b-it";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct HttpModel {
    client: Client,
    endpoint: String,
    model: String,
    token: Option<String>,
    token_env: String,
}

impl HttpModel {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
            model: model.into(),
            token,
            token_env: String::new(),
        })
    }

    /// Build the client from config; the token is read from the environment
    /// variable named by `token_env` (a `.env` file is honoured).
    ///
    /// A missing token is not an error here: every call then fails with
    /// [`ModelError::MissingToken`] and the pipeline degrades.
    pub fn from_config(cfg: &Config) -> Result<Self, ModelError> {
        dotenvy::dotenv().ok();

        let token = std::env::var(&cfg.token_env).ok().filter(|t| !t.is_empty());
        if token.is_none() {
            warn!(env = %cfg.token_env, "model API token is not set");
        }

        let mut model = Self::new(
            cfg.model_endpoint.clone(),
            cfg.model_name.clone(),
            token,
            Duration::from_secs(cfg.model_timeout_secs),
        )?;
        model.token_env = cfg.token_env.clone();
        Ok(model)
    }
}

/// Pull a readable message out of an error body, whichever shape it has.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => v
            .pointer("/error/message")
            .or_else(|| v.get("error"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}

impl LanguageModel for HttpModel {
    fn complete(&self, prompt: &str, max_reply_tokens: u32) -> Result<String, ModelError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ModelError::MissingToken(self.token_env.clone()))?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: max_reply_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ModelError::EmptyContent)?;

        debug!(chars = content.chars().count(), "model reply received");
        Ok(content)
    }
}
