use anyhow::Result;
use std::fmt::Write as _;
use teloxide::{prelude::*, types::InputFile};

use crate::config::Config;
use crate::export::{all_current_shortcodes, export_text};
use crate::extractor::{Exercise, ExtractionResult};
use crate::messages::{unknown_exercise_text, NO_RAW_REPLY, NO_RESULT, SHOW_USAGE};
use crate::session::Sessions;
use crate::utils::send_long;
use crate::versions::VersionStore;

/// Statement plus every exercise with its current shortcode.
pub fn format_result(result: &ExtractionResult, versions: &VersionStore) -> String {
    let mut out = format!("📝 Enunciado:\n{}\n", result.statement);
    for exercise in &result.exercises {
        let current = versions.current(&exercise.number, &exercise.shortcode);
        let _ = write!(
            out,
            "\n• Ejercicio {} ({})\n{}\n\n{}\n",
            exercise.number, exercise.declared_type, exercise.original_text, current
        );
    }
    out
}

/// One exercise with its whole version history, oldest first.
pub fn format_exercise(exercise: &Exercise, versions: &VersionStore) -> String {
    let mut out = format!(
        "Ejercicio {} ({})\n{}\n\nShortcode actual:\n{}\n",
        exercise.number,
        exercise.declared_type,
        exercise.original_text,
        versions.current(&exercise.number, &exercise.shortcode)
    );
    let history = versions.history(&exercise.number);
    if history.len() > 1 {
        out.push_str("\nHistorial de versiones:\n");
        for (idx, version) in history.iter().enumerate() {
            let _ = write!(
                out,
                "\nVersión {} ({})\n{}\n",
                idx + 1,
                version.timestamp.format("%H:%M:%S"),
                version.shortcode
            );
            if let Some(explanation) = version.explanation.as_deref().filter(|e| !e.is_empty()) {
                let _ = writeln!(out, "Cambios: {explanation}");
            }
        }
    }
    out
}

pub async fn show_exercises(bot: Bot, msg: Message, sessions: Sessions) -> Result<()> {
    let handle = sessions.get(msg.chat.id).await;
    let session = handle.lock().await;
    match session.result.as_ref() {
        Some(result) => send_long(&bot, msg.chat.id, &format_result(result, &session.versions)).await,
        None => {
            bot.send_message(msg.chat.id, NO_RESULT).await?;
            Ok(())
        }
    }
}

pub async fn show_exercise(bot: Bot, msg: Message, sessions: Sessions, number: String) -> Result<()> {
    let number = number.trim();
    if number.is_empty() {
        bot.send_message(msg.chat.id, SHOW_USAGE).await?;
        return Ok(());
    }
    let handle = sessions.get(msg.chat.id).await;
    let session = handle.lock().await;
    let Some(result) = session.result.as_ref() else {
        bot.send_message(msg.chat.id, NO_RESULT).await?;
        return Ok(());
    };
    match result.exercise(number) {
        Some(exercise) => {
            send_long(&bot, msg.chat.id, &format_exercise(exercise, &session.versions)).await
        }
        None => {
            bot.send_message(msg.chat.id, unknown_exercise_text(number))
                .await?;
            Ok(())
        }
    }
}

pub async fn show_shortcodes(bot: Bot, msg: Message, sessions: Sessions) -> Result<()> {
    let handle = sessions.get(msg.chat.id).await;
    let session = handle.lock().await;
    match session.result.as_ref().filter(|r| !r.exercises.is_empty()) {
        Some(result) => {
            send_long(&bot, msg.chat.id, &all_current_shortcodes(result, &session.versions)).await
        }
        None => {
            bot.send_message(msg.chat.id, NO_RESULT).await?;
            Ok(())
        }
    }
}

pub async fn show_raw(bot: Bot, msg: Message, sessions: Sessions) -> Result<()> {
    let handle = sessions.get(msg.chat.id).await;
    let session = handle.lock().await;
    match session.last_reply.as_deref() {
        Some(reply) => send_long(&bot, msg.chat.id, reply).await,
        None => {
            bot.send_message(msg.chat.id, NO_RAW_REPLY).await?;
            Ok(())
        }
    }
}

/// Send the export as a text document.
pub async fn send_export(bot: Bot, msg: Message, sessions: Sessions, config: Config) -> Result<()> {
    let handle = sessions.get(msg.chat.id).await;
    let mut session = handle.lock().await;
    let Some(result) = session.result.as_ref() else {
        bot.send_message(msg.chat.id, NO_RESULT).await?;
        return Ok(());
    };
    let text = export_text(result, &session.versions);
    let file = InputFile::memory(text.into_bytes()).file_name(config.export_filename.clone());
    bot.send_document(msg.chat.id, file).await?;
    session.record("Exported results", Some(config.export_filename));
    Ok(())
}
