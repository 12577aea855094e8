use anyhow::Result;
use teloxide::{dispatching::UpdateHandler, prelude::*};

pub mod ai;
pub mod commands;
pub mod config;
pub mod export;
pub mod extractor;
pub mod handlers;
pub mod messages;
pub mod publish;
pub mod refine;
pub mod session;
pub mod text_utils;
pub mod utils;
pub mod versions;

pub use ai::{AiConfig, AnthropicClient, CompletionError, ImageSource};
pub use commands::Command;
pub use config::Config;
pub use export::{all_current_shortcodes, export_text};
pub use extractor::{extract, Exercise, ExtractionResult, NO_STATEMENT};
pub use handlers::{
    extract_from_document, extract_from_photo, extract_from_text, format_result, help,
};
pub use publish::{PublishClient, PublishConfig, PublishError};
pub use refine::{parse_refinement_reply, refine_exercise, RefineError, RefinedShortcode};
pub use session::{Session, Sessions};
pub use versions::{ShortcodeVersion, VersionStore};

// ──────────────────────────────────────────────────────────────
// Handler tree
// ──────────────────────────────────────────────────────────────

/// Message routing: photos, documents, commands, then plain text.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter(|msg: Message| msg.photo().is_some())
                .endpoint(extract_from_photo),
        )
        .branch(
            dptree::entry()
                .filter(|msg: Message| msg.document().is_some())
                .endpoint(extract_from_document),
        )
        .branch(dptree::entry().filter_command::<Command>().endpoint(
            |bot: Bot,
             msg: Message,
             cmd: Command,
             sessions: Sessions,
             ai: Option<AnthropicClient>,
             publisher: Option<PublishClient>,
             config: Config| async move {
                cmd.dispatch(bot, msg, sessions, ai, publisher, config).await
            },
        ))
        .branch(dptree::endpoint(extract_from_text))
}

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting shortcode bot...");

    let ai = match config.ai.as_ref() {
        Some(ai_config) => {
            tracing::info!(model = %ai_config.model, "model access enabled");
            Some(AnthropicClient::new(ai_config)?)
        }
        None => {
            tracing::warn!("ANTHROPIC_API_KEY is not set; extraction and refinement are disabled");
            None
        }
    };
    let publisher = match config.publish.as_ref() {
        Some(publish_config) => {
            tracing::info!(url = %publish_config.base_url, "publishing enabled");
            Some(PublishClient::new(publish_config)?)
        }
        None => None,
    };

    let bot = Bot::from_env();
    let sessions = Sessions::new();

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![config, sessions, ai, publisher])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
