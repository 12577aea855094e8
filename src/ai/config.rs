use std::env;

pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";
pub const DEFAULT_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

#[derive(Clone, Debug)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub messages_url: String,
    pub api_version: String,
    pub extract_max_tokens: u32,
    pub refine_max_tokens: u32,
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Returns `None` when no API key is configured, which disables every
    /// model call up front.
    pub fn from_env() -> Option<Self> {
        let api_key = match env::var("ANTHROPIC_API_KEY") {
            Ok(k) if !k.trim().is_empty() => k,
            _ => return None,
        };
        Some(Self {
            api_key,
            model: env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            messages_url: env::var("ANTHROPIC_MESSAGES_URL")
                .unwrap_or_else(|_| DEFAULT_MESSAGES_URL.to_string()),
            api_version: env::var("ANTHROPIC_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            extract_max_tokens: parse_var("AI_EXTRACT_MAX_TOKENS", 4000),
            refine_max_tokens: parse_var("AI_REFINE_MAX_TOKENS", 1000),
            timeout_secs: parse_var("AI_TIMEOUT_SECS", 60),
        })
    }
}

pub(crate) fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
