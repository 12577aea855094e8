use anyhow::Result;
use teloxide::prelude::*;
use tracing::warn;

use crate::ai::AnthropicClient;
use crate::config::Config;
use crate::messages::{refine_error_text, AI_DISABLED, REFINE_USAGE, REFINING};
use crate::refine::refine_exercise;
use crate::session::Sessions;
use crate::utils::send_long;

/// Split `/refine` arguments into the exercise number and the instruction.
pub fn parse_refine_args(args: &str) -> Option<(String, String)> {
    let args = args.trim();
    let (number, instruction) = args.split_once(char::is_whitespace)?;
    let instruction = instruction.trim();
    if number.is_empty() || instruction.is_empty() {
        return None;
    }
    Some((number.to_string(), instruction.to_string()))
}

pub async fn refine_command(
    bot: Bot,
    msg: Message,
    sessions: Sessions,
    ai: Option<AnthropicClient>,
    config: Config,
    args: String,
) -> Result<()> {
    let Some((number, instruction)) = parse_refine_args(&args) else {
        bot.send_message(msg.chat.id, REFINE_USAGE).await?;
        return Ok(());
    };
    let (Some(client), Some(ai_config)) = (ai.as_ref(), config.ai.as_ref()) else {
        bot.send_message(msg.chat.id, AI_DISABLED).await?;
        return Ok(());
    };

    let handle = sessions.get(msg.chat.id).await;
    let mut session = handle.lock().await;
    bot.send_message(msg.chat.id, REFINING).await?;

    let session = &mut *session;
    let outcome = refine_exercise(
        client,
        session.result.as_ref(),
        &mut session.versions,
        &number,
        &instruction,
        ai_config.refine_max_tokens,
    )
    .await;

    match outcome {
        Ok(refined) => {
            session.record(format!("Refined exercise {number}"), Some(instruction));
            let mut text = format!("Shortcode refinado (ejercicio {number}):\n\n{}", refined.shortcode);
            if let Some(explanation) = refined.explanation.filter(|e| !e.is_empty()) {
                text.push_str(&format!("\n\nExplicación: {explanation}"));
            }
            send_long(&bot, msg.chat.id, &text).await?;
        }
        Err(err) => {
            warn!(error = %err, number, "refinement failed");
            session.record(format!("Refinement of exercise {number} failed"), Some(err.to_string()));
            bot.send_message(msg.chat.id, refine_error_text(&err)).await?;
        }
    }
    Ok(())
}
