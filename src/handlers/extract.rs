use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::ai::prompts::{build_extraction_prompt, PromptSubject};
use crate::ai::{AnthropicClient, CompletionError, ImageSource};
use crate::config::Config;
use crate::extractor::extract;
use crate::messages::{
    ai_error_text, url_check_warning, AI_DISABLED, ANALYZING, EMPTY_TEXT, IMAGE_USAGE,
    NO_EXERCISES_FOUND,
};
use crate::session::{Session, Sessions};
use crate::text_utils::snippet;
use crate::utils::send_long;

use super::results::format_result;

/// What an extraction runs on.
#[derive(Debug, Clone)]
pub enum ExtractionInput {
    Text(String),
    Image(ImageSource),
}

impl ExtractionInput {
    fn label(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(ImageSource::Url(_)) => "image url",
            Self::Image(ImageSource::Base64 { .. }) => "uploaded image",
        }
    }
}

/// Run one extraction and install its result in `session`.
///
/// On failure the current result and its histories are left as they were.
#[instrument(level = "trace", skip(client, session, input), fields(kind = input.label()))]
pub async fn analyze(
    client: &AnthropicClient,
    session: &mut Session,
    input: ExtractionInput,
    max_tokens: u32,
) -> Result<(), CompletionError> {
    let (prompt, image) = match &input {
        ExtractionInput::Text(text) => (
            build_extraction_prompt(PromptSubject::Text(text), &session.custom_prompt),
            None,
        ),
        ExtractionInput::Image(image) => (
            build_extraction_prompt(PromptSubject::Image, &session.custom_prompt),
            Some(image),
        ),
    };

    let reply = match client.complete(&prompt, image, max_tokens).await {
        Ok(reply) => reply,
        Err(err) => {
            session.record("Extraction failed", Some(err.to_string()));
            return Err(err);
        }
    };

    let result = extract(&reply);
    info!(exercises = result.exercises.len(), "extraction finished");
    session.record(
        format!("Analyzed {}", input.label()),
        Some(format!("{} exercises", result.exercises.len())),
    );
    if let ExtractionInput::Image(ImageSource::Url(url)) = &input {
        session.image_url = Some(url.clone());
    }
    session.install(result, reply);
    Ok(())
}

/// Run an extraction for the chat of `msg` and report the outcome.
pub async fn run_extraction(
    bot: Bot,
    msg: &Message,
    sessions: &Sessions,
    ai: Option<&AnthropicClient>,
    config: &Config,
    input: ExtractionInput,
) -> Result<()> {
    let Some(client) = ai else {
        bot.send_message(msg.chat.id, AI_DISABLED).await?;
        return Ok(());
    };
    let max_tokens = config.ai.as_ref().map_or(4000, |c| c.extract_max_tokens);

    let handle = sessions.get(msg.chat.id).await;
    let mut session = handle.lock().await;
    bot.send_message(msg.chat.id, ANALYZING).await?;

    if let Err(err) = analyze(client, &mut session, input, max_tokens).await {
        warn!(error = %err, chat_id = msg.chat.id.0, "extraction failed");
        bot.send_message(msg.chat.id, ai_error_text(&err)).await?;
        return Ok(());
    }

    match session.result.as_ref() {
        Some(result) if !result.is_empty() => {
            send_long(&bot, msg.chat.id, &format_result(result, &session.versions)).await?;
        }
        _ => {
            let reply = session.last_reply.clone().unwrap_or_default();
            debug!(snippet = %snippet(&reply, 200), "reply had no exercises");
            send_long(&bot, msg.chat.id, &format!("{NO_EXERCISES_FOUND}\n\n{reply}")).await?;
        }
    }
    Ok(())
}

/// Plain text messages and `/text`.
pub async fn extract_from_text(
    bot: Bot,
    msg: Message,
    sessions: Sessions,
    ai: Option<AnthropicClient>,
    config: Config,
) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let text = match strip_text_command(text) {
        Some(rest) => rest,
        None if text.starts_with('/') => return super::info::help(bot, msg.clone()).await,
        None => text,
    };
    analyze_text(bot, &msg, &sessions, ai.as_ref(), &config, text).await
}

/// Body of a `/text` command that the command parser rejected, e.g. one
/// whose argument starts on the next line.
fn strip_text_command(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("/text")?;
    let rest = match rest.strip_prefix('@') {
        Some(mention) => mention.trim_start_matches(|c: char| !c.is_whitespace()),
        None => rest,
    };
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

pub async fn analyze_text(
    bot: Bot,
    msg: &Message,
    sessions: &Sessions,
    ai: Option<&AnthropicClient>,
    config: &Config,
    text: &str,
) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        bot.send_message(msg.chat.id, EMPTY_TEXT).await?;
        return Ok(());
    }
    run_extraction(
        bot,
        msg,
        sessions,
        ai,
        config,
        ExtractionInput::Text(text.to_string()),
    )
    .await
}

/// `/image <url>`: the URL is checked first but a failed check only warns.
pub async fn extract_from_url(
    bot: Bot,
    msg: &Message,
    sessions: &Sessions,
    ai: Option<&AnthropicClient>,
    config: &Config,
    url: &str,
) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        bot.send_message(msg.chat.id, IMAGE_USAGE).await?;
        return Ok(());
    }
    let Some(client) = ai else {
        bot.send_message(msg.chat.id, AI_DISABLED).await?;
        return Ok(());
    };

    match client.check_url(url, config.url_check_timeout_secs).await {
        Ok(status) if (200..300).contains(&status) => {}
        Ok(status) => {
            let warning = url_check_warning(&format!("HTTP {status}"));
            bot.send_message(msg.chat.id, warning).await?;
        }
        Err(err) => {
            warn!(error = %err, url, "image url check failed");
            bot.send_message(msg.chat.id, url_check_warning(&err.to_string()))
                .await?;
        }
    }

    run_extraction(
        bot,
        msg,
        sessions,
        ai,
        config,
        ExtractionInput::Image(ImageSource::Url(url.to_string())),
    )
    .await
}
