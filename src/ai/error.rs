use thiserror::Error;

/// Why a model call produced no text.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("model API key is not configured")]
    MissingCredentials,

    #[error("could not reach the model service: {0}")]
    Transport(#[from] reqwest::Error),

    /// `detail` is the JSON error body when it parses, otherwise raw text.
    #[error("model service returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("unexpected model response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("model response contained no text")]
    EmptyReply,
}

/// Render an error body the way it should be shown to a user: compact JSON
/// when it parses, the raw text otherwise.
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value.to_string(),
        Err(_) => body.trim().to_string(),
    }
}
