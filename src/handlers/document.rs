use anyhow::Result;
use teloxide::prelude::*;
use tracing::debug;

use crate::ai::{AnthropicClient, ImageSource};
use crate::config::Config;
use crate::messages::{AI_DISABLED, DOCUMENT_NOT_UTF8, UNSUPPORTED_DOCUMENT};
use crate::session::Sessions;
use crate::utils::download_telegram_file;

use super::extract::{analyze_text, run_extraction, ExtractionInput};

#[derive(Debug, Clone, PartialEq, Eq)]
enum DocumentKind {
    Text,
    Image(String),
    Unsupported,
}

fn classify(file_name: Option<&str>, mime: Option<&str>) -> DocumentKind {
    match mime {
        Some(m) if m.starts_with("image/") => return DocumentKind::Image(m.to_string()),
        Some("text/plain") => return DocumentKind::Text,
        _ => {}
    }
    match file_name {
        Some(name) if name.to_lowercase().ends_with(".txt") => DocumentKind::Text,
        _ => DocumentKind::Unsupported,
    }
}

/// Text files are analyzed as text, image files as images.
pub async fn extract_from_document(
    bot: Bot,
    msg: Message,
    sessions: Sessions,
    ai: Option<AnthropicClient>,
    config: Config,
) -> Result<()> {
    let Some(doc) = msg.document() else {
        return Ok(());
    };
    let mime = doc.mime_type.as_ref().map(|m| m.essence_str().to_string());
    let kind = classify(doc.file_name.as_deref(), mime.as_deref());
    debug!(?kind, file_name = ?doc.file_name, "received document");

    if kind == DocumentKind::Unsupported {
        bot.send_message(msg.chat.id, UNSUPPORTED_DOCUMENT).await?;
        return Ok(());
    }
    if ai.is_none() {
        bot.send_message(msg.chat.id, AI_DISABLED).await?;
        return Ok(());
    }

    let bytes = download_telegram_file(&bot, &doc.file).await?;
    match kind {
        DocumentKind::Text => match String::from_utf8(bytes) {
            Ok(text) => analyze_text(bot, &msg, &sessions, ai.as_ref(), &config, &text).await,
            Err(_) => {
                bot.send_message(msg.chat.id, DOCUMENT_NOT_UTF8).await?;
                Ok(())
            }
        },
        DocumentKind::Image(media_type) => {
            let image = ImageSource::from_bytes(&media_type, &bytes);
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
        DocumentKind::Unsupported => Ok(()),
    }
}
