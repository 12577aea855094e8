use anyhow::Result;
use teloxide::prelude::*;

use crate::ai::prompts::render_catalog_samples;
use crate::messages::HELP_TEXT;
use crate::utils::send_long;

pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, HELP_TEXT)
        .parse_mode(teloxide::types::ParseMode::Html)
        .await?;
    Ok(())
}

/// Every shortcode kind with an example.
pub async fn show_catalog(bot: Bot, msg: Message) -> Result<()> {
    send_long(&bot, msg.chat.id, &render_catalog_samples()).await
}
