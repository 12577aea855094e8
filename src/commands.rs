use anyhow::Result;
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::ai::AnthropicClient;
use crate::config::Config;
use crate::handlers::{
    analyze_text, extract_from_url, help, list_tags, publish_command, refine_command,
    reset_session, send_export, set_prompt, show_catalog, show_exercise, show_exercises,
    show_log, show_raw, show_shortcodes,
};
use crate::publish::PublishClient;
use crate::session::Sessions;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "Comandos disponibles:"
)]
pub enum Command {
    #[command(description = "mostrar esta ayuda.")]
    Start,
    #[command(description = "mostrar esta ayuda.")]
    Help,
    #[command(description = "analizar el texto indicado.")]
    Text(String),
    #[command(description = "analizar la imagen de una URL.")]
    Image(String),
    #[command(description = "fijar o borrar instrucciones adicionales.")]
    Prompt(String),
    #[command(description = "ver el resultado actual.")]
    Exercises,
    #[command(description = "ver un ejercicio y su historial.")]
    Show(String),
    #[command(description = "ver todos los shortcodes actuales.")]
    Shortcodes,
    #[command(description = "refinar el shortcode de un ejercicio.")]
    Refine(String),
    #[command(description = "descargar los resultados.")]
    Export,
    #[command(description = "ver la última respuesta del modelo.")]
    Raw,
    #[command(description = "ver los tipos de shortcode.")]
    Catalog,
    #[command(description = "ver el historial de la sesión.")]
    Log,
    #[command(description = "ver las etiquetas disponibles.")]
    Tags(String),
    #[command(description = "publicar los ejercicios.")]
    Publish(String),
    #[command(description = "empezar de cero.")]
    Reset,
}

impl Command {
    pub async fn dispatch(
        self,
        bot: Bot,
        msg: Message,
        sessions: Sessions,
        ai: Option<AnthropicClient>,
        publisher: Option<PublishClient>,
        config: Config,
    ) -> Result<()> {
        tracing::debug!(command = ?self, chat_id = msg.chat.id.0, "dispatching command");
        match self {
            Command::Start | Command::Help => help(bot, msg).await?,
            Command::Text(text) => {
                analyze_text(bot, &msg, &sessions, ai.as_ref(), &config, &text).await?
            }
            Command::Image(url) => {
                extract_from_url(bot, &msg, &sessions, ai.as_ref(), &config, &url).await?
            }
            Command::Prompt(prompt) => set_prompt(bot, msg, sessions, prompt).await?,
            Command::Exercises => show_exercises(bot, msg, sessions).await?,
            Command::Show(number) => show_exercise(bot, msg, sessions, number).await?,
            Command::Shortcodes => show_shortcodes(bot, msg, sessions).await?,
            Command::Refine(args) => refine_command(bot, msg, sessions, ai, config, args).await?,
            Command::Export => send_export(bot, msg, sessions, config).await?,
            Command::Raw => show_raw(bot, msg, sessions).await?,
            Command::Catalog => show_catalog(bot, msg).await?,
            Command::Log => show_log(bot, msg, sessions).await?,
            Command::Tags(query) => list_tags(bot, msg, publisher, query).await?,
            Command::Publish(args) => publish_command(bot, msg, sessions, publisher, args).await?,
            Command::Reset => reset_session(bot, msg, sessions).await?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_take_the_rest_of_the_line() {
        assert_eq!(
            Command::parse("/refine 2 añade tiempo", "bot").unwrap(),
            Command::Refine("2 añade tiempo".into())
        );
        assert_eq!(
            Command::parse("/publish", "bot").unwrap(),
            Command::Publish(String::new())
        );
        assert_eq!(Command::parse("/export", "bot").unwrap(), Command::Export);
    }
}
