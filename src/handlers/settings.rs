use anyhow::Result;
use std::fmt::Write as _;
use teloxide::prelude::*;

use crate::messages::{prompt_set_text, LOG_EMPTY, PROMPT_CLEARED, SESSION_RESET};
use crate::session::{Activity, Sessions};
use crate::utils::send_long;

/// `/prompt` with text sets the extra instructions, without text clears them.
pub async fn set_prompt(bot: Bot, msg: Message, sessions: Sessions, prompt: String) -> Result<()> {
    let prompt = prompt.trim().to_string();
    let handle = sessions.get(msg.chat.id).await;
    let mut session = handle.lock().await;

    let reply = if prompt.is_empty() {
        session.custom_prompt.clear();
        session.record("Custom instructions cleared", None);
        PROMPT_CLEARED.to_string()
    } else {
        session.record("Custom instructions set", Some(prompt.clone()));
        let reply = prompt_set_text(&prompt);
        session.custom_prompt = prompt;
        reply
    };
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

pub async fn reset_session(bot: Bot, msg: Message, sessions: Sessions) -> Result<()> {
    let handle = sessions.get(msg.chat.id).await;
    handle.lock().await.reset();
    tracing::info!(chat_id = msg.chat.id.0, "session reset");
    bot.send_message(msg.chat.id, SESSION_RESET).await?;
    Ok(())
}

pub fn format_activity<'a>(entries: impl IntoIterator<Item = &'a Activity>) -> String {
    let mut out = String::new();
    for entry in entries {
        let time = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
        match entry.details.as_deref() {
            Some(details) => {
                let _ = writeln!(out, "{time} {}: {details}", entry.event);
            }
            None => {
                let _ = writeln!(out, "{time} {}", entry.event);
            }
        }
    }
    out
}

pub async fn show_log(bot: Bot, msg: Message, sessions: Sessions) -> Result<()> {
    let handle = sessions.get(msg.chat.id).await;
    let session = handle.lock().await;
    if session.activity().is_empty() {
        bot.send_message(msg.chat.id, LOG_EMPTY).await?;
        return Ok(());
    }
    send_long(&bot, msg.chat.id, &format_activity(session.activity())).await
}
