use anyhow::Result;
use std::fmt::Write as _;
use teloxide::prelude::*;
use tracing::warn;

use crate::extractor::{ExtractionResult, NO_STATEMENT};
use crate::messages::{
    publish_error_text, published_text, tag_not_found_text, NO_TAGS, PUBLISH_DISABLED,
};
use crate::publish::{find_tag, PublishClient, Tag};
use crate::session::Sessions;
use crate::text_utils::snippet;
use crate::utils::send_long;

const DEFAULT_GROUP_NAME: &str = "Ejercicios";
const GROUP_NAME_MAX_CHARS: usize = 60;

/// Where `/publish` sends the questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    /// `#id`: append to an existing group.
    Existing(i64),
    /// A name: create a new group.
    New(String),
    /// No argument: reuse the last group or create one.
    Default,
}

pub fn parse_publish_target(args: &str) -> PublishTarget {
    let args = args.trim();
    if args.is_empty() {
        return PublishTarget::Default;
    }
    match args.strip_prefix('#').map(|id| id.trim().parse::<i64>()) {
        Some(Ok(id)) => PublishTarget::Existing(id),
        _ => PublishTarget::New(args.to_string()),
    }
}

/// Group name derived from the statement's first line.
pub fn default_group_name(result: Option<&ExtractionResult>) -> String {
    result
        .map(|r| r.statement.lines().next().unwrap_or_default().trim())
        .filter(|s| !s.is_empty() && *s != NO_STATEMENT)
        .map(|s| snippet(s, GROUP_NAME_MAX_CHARS))
        .unwrap_or_else(|| DEFAULT_GROUP_NAME.to_string())
}

pub fn format_tags(tags: &[Tag]) -> String {
    let mut out = String::new();
    for tag in tags {
        match tag.parent_id {
            Some(parent) => {
                let _ = writeln!(out, "#{} {} (dentro de #{parent})", tag.id, tag.name);
            }
            None => {
                let _ = writeln!(out, "#{} {}", tag.id, tag.name);
            }
        }
    }
    out
}

pub async fn list_tags(
    bot: Bot,
    msg: Message,
    publisher: Option<PublishClient>,
    query: String,
) -> Result<()> {
    let Some(client) = publisher else {
        bot.send_message(msg.chat.id, PUBLISH_DISABLED).await?;
        return Ok(());
    };
    let tags = match client.list_tags().await {
        Ok(tags) => tags,
        Err(err) => {
            warn!(error = %err, "listing tags failed");
            bot.send_message(msg.chat.id, publish_error_text(&err)).await?;
            return Ok(());
        }
    };

    let query = query.trim();
    let text = if query.is_empty() {
        format_tags(&tags)
    } else {
        match find_tag(&tags, query) {
            Some(tag) => format_tags(std::slice::from_ref(tag)),
            None => tag_not_found_text(query),
        }
    };
    if text.is_empty() {
        bot.send_message(msg.chat.id, NO_TAGS).await?;
    } else {
        send_long(&bot, msg.chat.id, &text).await?;
    }
    Ok(())
}

pub async fn publish_command(
    bot: Bot,
    msg: Message,
    sessions: Sessions,
    publisher: Option<PublishClient>,
    args: String,
) -> Result<()> {
    let Some(client) = publisher else {
        bot.send_message(msg.chat.id, PUBLISH_DISABLED).await?;
        return Ok(());
    };

    let handle = sessions.get(msg.chat.id).await;
    let mut session = handle.lock().await;
    let (group, name) = match parse_publish_target(&args) {
        PublishTarget::Existing(id) => (Some(id), String::new()),
        PublishTarget::New(name) => (None, name),
        PublishTarget::Default => (
            session.published_group,
            default_group_name(session.result.as_ref()),
        ),
    };

    let outcome = client
        .publish(session.result.as_ref(), &session.versions, group, &name)
        .await;
    match outcome {
        Ok(outcome) => {
            session.published_group = Some(outcome.group_id);
            session.record(
                "Published questions",
                Some(format!("group {}, {} added", outcome.group_id, outcome.appended)),
            );
            let text = published_text(
                outcome.group_id,
                outcome.created,
                outcome.appended,
                outcome.skipped,
            );
            bot.send_message(msg.chat.id, text).await?;
        }
        Err(err) => {
            warn!(error = %err, "publishing failed");
            if let Some(id) = err.created_group() {
                session.published_group = Some(id);
            }
            session.record("Publishing failed", Some(err.to_string()));
            bot.send_message(msg.chat.id, publish_error_text(&err)).await?;
        }
    }
    Ok(())
}
