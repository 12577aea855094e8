use anyhow::Result;
use teloxide::prelude::*;

use crate::ai::{AnthropicClient, ImageSource};
use crate::config::Config;
use crate::messages::AI_DISABLED;
use crate::session::Sessions;
use crate::utils::download_telegram_file;

use super::extract::{run_extraction, ExtractionInput};

/// Telegram recompresses photos as JPEG.
const PHOTO_MEDIA_TYPE: &str = "image/jpeg";

pub async fn extract_from_photo(
    bot: Bot,
    msg: Message,
    sessions: Sessions,
    ai: Option<AnthropicClient>,
    config: Config,
) -> Result<()> {
    if ai.is_none() {
        bot.send_message(msg.chat.id, AI_DISABLED).await?;
        return Ok(());
    }

    let photo_sizes = match msg.photo() {
        Some(p) => p,
        None => return Ok(()),
    };
    let Some(file) = photo_sizes
        .iter()
        .max_by_key(|p| p.file.size)
        .map(|p| p.file.clone())
    else {
        tracing::debug!("photo had no usable sizes");
        return Ok(());
    };

    let bytes = download_telegram_file(&bot, &file).await?;
    let image = ImageSource::from_bytes(PHOTO_MEDIA_TYPE, &bytes);
    run_extraction(
        bot,
        &msg,
        &sessions,
        ai.as_ref(),
        &config,
        ExtractionInput::Image(image),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn photo_with_no_sizes_returns_ok() {
        let bot = Bot::new("test");
        let json = r#"{"message_id":1,"date":0,"chat":{"id":1,"type":"private"},"photo":[]}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        let config = crate::ai::AiConfig {
            api_key: "k".into(),
            model: "m".into(),
            messages_url: "http://localhost:9".into(),
            api_version: "v".into(),
            extract_max_tokens: 1,
            refine_max_tokens: 1,
            timeout_secs: 1,
        };
        let client = AnthropicClient::new(&config).unwrap();
        let config = Config {
            ai: Some(config),
            publish: None,
            export_filename: "out.txt".into(),
            url_check_timeout_secs: 1,
        };

        let res = extract_from_photo(bot, msg, Sessions::new(), Some(client), config).await;
        assert!(res.is_ok());
    }
}
