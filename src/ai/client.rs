use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument, trace, warn};

use super::config::AiConfig;
use super::error::{error_detail, CompletionError};

/// Image handed to the model next to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Publicly reachable URL the model service fetches itself.
    Url(String),
    /// Inline image data, already base64 encoded.
    Base64 { media_type: String, data: String },
}

impl ImageSource {
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self::Base64 {
            media_type: media_type.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    fn content_block(&self) -> Value {
        match self {
            Self::Url(url) => json!({
                "type": "image",
                "source": { "type": "url", "url": url },
            }),
            Self::Base64 { media_type, data } => json!({
                "type": "image",
                "source": { "type": "base64", "media_type": media_type, "data": data },
            }),
        }
    }
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// Request body for a single-turn Messages API call. The image block, when
/// present, precedes the text block.
pub fn build_messages_body(
    model: &str,
    max_tokens: u32,
    prompt: &str,
    image: Option<&ImageSource>,
) -> Value {
    let mut content = Vec::with_capacity(2);
    if let Some(image) = image {
        content.push(image.content_block());
    }
    content.push(json!({ "type": "text", "text": prompt }));

    json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": [ { "role": "user", "content": content } ],
    })
}

/// Text of the first text block of a Messages API response body.
pub fn parse_reply_text(raw: &str) -> Result<String, CompletionError> {
    let response: MessagesResponse = serde_json::from_str(raw)?;
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or(CompletionError::EmptyReply)
}

/// Client for the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
    api_version: String,
}

impl AnthropicClient {
    pub fn new(config: &AiConfig) -> Result<Self, CompletionError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(CompletionError::MissingCredentials);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: config.model.clone(),
            url: config.messages_url.clone(),
            api_version: config.api_version.clone(),
        })
    }

    /// Send `prompt` (and optionally an image) and return the reply text.
    ///
    /// The whole reply is buffered before it is returned.
    #[instrument(level = "trace", skip(self, prompt, image), fields(model = %self.model))]
    pub async fn complete(
        &self,
        prompt: &str,
        image: Option<&ImageSource>,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let body = build_messages_body(&self.model, max_tokens, prompt, image);
        debug!(
            url = %self.url,
            with_image = image.is_some(),
            prompt_len = prompt.len(),
            "sending messages request"
        );

        let resp = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err_text = resp.text().await.unwrap_or_default();
            warn!(%status, "model API error");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                detail: error_detail(&err_text),
            });
        }

        let raw = resp.text().await?;
        let snippet: String = raw.chars().take(200).collect();
        debug!(snippet = %snippet, "messages response body");
        trace!(raw = %raw, "messages response");
        parse_reply_text(&raw)
    }

    /// Lightweight existence check for an image URL; returns the HTTP status.
    #[instrument(level = "trace", skip(self))]
    pub async fn check_url(&self, url: &str, timeout_secs: u64) -> Result<u16, CompletionError> {
        let resp = self
            .http
            .head(url)
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await?;
        let status = resp.status().as_u16();
        debug!(url, status, "checked image url");
        Ok(status)
    }
}
