//! Shared text sent by the bot.
//!
//! Keep all user-facing strings in this module so they stay in one place and are
//! easy to update or translate.

pub const HELP_TEXT: &str =
    "Envíame el texto de unos ejercicios, una foto de la página o un archivo .txt \
     y los convertiré en shortcodes.\n\n\
     <b>Comandos:</b>\n\
     /text &lt;texto&gt; - Analizar un texto.\n\
     /image &lt;url&gt; - Analizar una imagen publicada en una URL.\n\
     /prompt [instrucciones] - Fijar o borrar instrucciones adicionales.\n\
     /exercises - Ver el resultado actual.\n\
     /show &lt;n&gt; - Ver un ejercicio y su historial de versiones.\n\
     /shortcodes - Ver todos los shortcodes actuales.\n\
     /refine &lt;n&gt; &lt;instrucción&gt; - Refinar el shortcode de un ejercicio.\n\
     /export - Descargar los resultados como texto.\n\
     /raw - Ver la última respuesta completa del modelo.\n\
     /catalog - Ver los tipos de shortcode disponibles.\n\
     /log - Ver el historial de la sesión.\n\
     /tags [id|nombre] - Ver las etiquetas del gestor de contenidos.\n\
     /publish [nombre|#id] - Publicar los ejercicios como grupo de preguntas.\n\
     /reset - Empezar de cero.";

pub const AI_DISABLED: &str =
    "El acceso al modelo no está configurado (falta ANTHROPIC_API_KEY).";
pub const PUBLISH_DISABLED: &str =
    "La publicación no está configurada (falta PUBLISH_API_URL).";

pub const ANALYZING: &str = "Analizando…";
pub const REFINING: &str = "Refinando el shortcode…";
pub const NO_EXERCISES_FOUND: &str =
    "No se identificaron ejercicios en la respuesta. Respuesta completa del modelo:";
pub const NO_RESULT: &str = "Todavía no hay resultados. Envíame un texto o una imagen.";
pub const NO_RAW_REPLY: &str = "Todavía no hay ninguna respuesta del modelo.";
pub const EMPTY_TEXT: &str = "No hay texto que analizar.";
pub const UNSUPPORTED_DOCUMENT: &str =
    "Solo puedo analizar archivos de texto (.txt) o imágenes.";
pub const DOCUMENT_NOT_UTF8: &str = "El archivo no es texto UTF-8 válido.";

pub const IMAGE_USAGE: &str = "Uso: /image <url>";
pub const SHOW_USAGE: &str = "Uso: /show <n>";
pub const REFINE_USAGE: &str = "Uso: /refine <n> <instrucción>";

pub const PROMPT_CLEARED: &str = "Instrucciones adicionales borradas.";
pub const SESSION_RESET: &str = "Sesión reiniciada.";
pub const LOG_EMPTY: &str = "El historial está vacío.";
pub const NO_TAGS: &str = "No hay etiquetas.";

pub fn prompt_set_text(prompt: &str) -> String {
    format!("Instrucciones adicionales guardadas:\n{prompt}")
}

pub fn url_check_warning(detail: &str) -> String {
    format!("Aviso: no se pudo verificar la URL de la imagen ({detail}). Intento analizarla igualmente.")
}

pub fn ai_error_text(err: &dyn std::fmt::Display) -> String {
    format!("Error al consultar el modelo: {err}")
}

pub fn refine_error_text(err: &dyn std::fmt::Display) -> String {
    format!("No se pudo refinar el shortcode: {err}")
}

pub fn publish_error_text(err: &dyn std::fmt::Display) -> String {
    format!("No se pudo publicar: {err}")
}

pub fn unknown_exercise_text(number: &str) -> String {
    format!("No existe el ejercicio {number}.")
}

pub fn tag_not_found_text(query: &str) -> String {
    format!("No se encontró la etiqueta «{query}».")
}

pub fn published_text(group_id: i64, created: bool, appended: usize, skipped: usize) -> String {
    let head = if created {
        format!("Grupo {group_id} creado.")
    } else {
        format!("Grupo {group_id} actualizado.")
    };
    format!("{head} Preguntas añadidas: {appended}. Ya existentes: {skipped}.")
}
