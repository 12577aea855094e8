use std::env;

use crate::ai::config::parse_var;

#[derive(Clone, Debug)]
pub struct PublishConfig {
    pub base_url: String,
    /// Bearer token for write calls; reads are tried without it first.
    pub api_key: Option<String>,
    pub language: String,
    pub group_status: String,
    pub timeout_secs: u64,
}

impl PublishConfig {
    /// Returns `None` when no publishing service is configured.
    pub fn from_env() -> Option<Self> {
        let base_url = match env::var("PUBLISH_API_URL") {
            Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => return None,
        };
        Some(Self {
            base_url,
            api_key: env::var("PUBLISH_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            language: env::var("PUBLISH_LANGUAGE").unwrap_or_else(|_| "es".to_string()),
            group_status: env::var("PUBLISH_GROUP_STATUS").unwrap_or_else(|_| "draft".to_string()),
            timeout_secs: parse_var("PUBLISH_TIMEOUT_SECS", 10),
        })
    }
}
