use std::env;

use crate::ai::config::{parse_var, AiConfig};
use crate::export::DEFAULT_EXPORT_FILENAME;
use crate::publish::PublishConfig;

#[derive(Clone)]
pub struct Config {
    pub ai: Option<AiConfig>,
    pub publish: Option<PublishConfig>,
    pub export_filename: String,
    pub url_check_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            ai: AiConfig::from_env(),
            publish: PublishConfig::from_env(),
            export_filename: env::var("EXPORT_FILENAME")
                .ok()
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string()),
            url_check_timeout_secs: parse_var("URL_CHECK_TIMEOUT_SECS", 5),
        }
    }
}
