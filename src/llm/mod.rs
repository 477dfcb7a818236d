//! Language-model seam used by the pipeline.
//!
//! The pipeline only needs "prompt in, text out, may fail"; everything
//! provider-specific lives in [`client`].

pub mod client;
pub mod prompt;

use thiserror::Error;

/// Upper bound on the reply length requested from the model.
pub const DEFAULT_MAX_REPLY_TOKENS: u32 = 250;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,

    #[error("API token not set (environment variable '{0}')")]
    MissingToken(String),
}

pub trait LanguageModel {
    /// Send `prompt` and return the raw reply text.
    fn complete(&self, prompt: &str, max_reply_tokens: u32) -> Result<String, ModelError>;
}

impl<T: LanguageModel + ?Sized> LanguageModel for &T {
    fn complete(&self, prompt: &str, max_reply_tokens: u32) -> Result<String, ModelError> {
        (**self).complete(prompt, max_reply_tokens)
    }
}
