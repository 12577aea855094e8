use anyhow::Result;
use futures_util::StreamExt;
use teloxide::{
    net::Download,
    prelude::*,
    types::{ChatId, FileMeta},
    RequestError,
};

use crate::text_utils::{split_message, MAX_MESSAGE_CHARS};

/// Download a file from Telegram and return the raw bytes.
pub async fn download_file(bot: &Bot, path: &str) -> Result<Vec<u8>, RequestError> {
    let mut data = Vec::new();
    let mut stream = bot.download_file_stream(path);
    while let Some(chunk) = stream.next().await {
        data.extend_from_slice(&chunk?);
    }
    tracing::trace!(size = data.len(), "downloaded file bytes");
    Ok(data)
}

/// Fetch a Telegram file by its metadata and return the raw bytes.
pub async fn download_telegram_file(bot: &Bot, meta: &FileMeta) -> Result<Vec<u8>> {
    let file = bot.get_file(meta.id.clone()).await?;
    tracing::debug!(path = %file.path, "Downloading Telegram file");
    let bytes = download_file(bot, &file.path).await?;
    tracing::debug!(path = %file.path, size = bytes.len(), "Finished download");
    Ok(bytes)
}

/// Send `text` as plain text, split over several messages when too long.
pub async fn send_long(bot: &Bot, chat_id: ChatId, text: &str) -> Result<()> {
    for part in split_message(text, MAX_MESSAGE_CHARS) {
        bot.send_message(chat_id, part).await?;
    }
    Ok(())
}
