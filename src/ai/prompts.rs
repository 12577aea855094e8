//! Prompts sent to the model.
//!
//! The reply layouts requested here (`ENUNCIADO:` / `ACTIVIDAD n:` and
//! `SHORTCODE REFINADO:` / `EXPLICACIÓN:`) are exactly what
//! [`crate::extractor`] and [`crate::refine`] parse, so edit them together.

use std::fmt::Write as _;

use super::catalog::{kind_names, CATALOG};

/// What the extraction prompt is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptSubject<'a> {
    /// Raw exercise text, embedded at the end of the prompt.
    Text(&'a str),
    /// An image sent alongside the prompt as a separate content block.
    Image,
}

const TASK_HEADER: &str = "# Tarea: Extraer ejercicios educativos y convertirlos en shortcodes\n\n";

const RULES: &str = "## Instrucciones IMPORTANTES

1. Analiza cuidadosamente el tipo de ejercicio antes de elegir el shortcode
2. Usa EXACTAMENTE la misma estructura y símbolos separadores (|, *, #, etc.) que se muestran en los ejemplos
3. Respeta el formato exacto de las comillas y corchetes
4. Si un ejercicio no encaja exactamente en un tipo, elige el más cercano y adáptalo
5. Si un ejercicio tiene múltiples partes que requieren diferentes tipos, trátalas como actividades separadas
6. Si un ejercicio tiene múltiples partes intenta que vaya en un ÚNICO shortcode
7. Los shortcodes tipo fill-in-the-blanks pueden usarse para agrupar en un único shortcode varios apartados distintos, del mismo tipo o de diferente tipo:
   – Ejemplo: [fill-in-the-blanks text=\"La capital de [text|España] es Madrid. El caballo [text|blanco] de Santiago es de [short-text|c][short-text|o][short-text|l][short-text|o][short-text|r] blanco. El animal más rápido del mundo es el [select|leopardo#*guepardo#león#tigre]. Las afirmaciones anteriores son: [radio|Verdaderas#Falsas*]\" casesensitive=\"false\" specialcharssensitive=\"false\"][/fill-in-the-blanks]

";

fn custom_block(custom: &str) -> String {
    let custom = custom.trim();
    if custom.is_empty() {
        String::new()
    } else {
        format!("\n\n## Instrucciones personalizadas adicionales\n\n{custom}\n")
    }
}

fn catalog_block() -> String {
    let mut out = String::from(
        "## Tipos de shortcodes disponibles\n\n\
         Debes convertir cada actividad al formato de shortcode más apropiado según los siguientes tipos:\n\n",
    );
    for (idx, kind) in CATALOG.iter().enumerate() {
        let _ = writeln!(out, "### {}. {}", idx + 1, kind.name);
        let _ = writeln!(out, "- Usar para: {}", kind.use_for);
        let _ = writeln!(out, "- Formato: {}", kind.format);
        let _ = writeln!(out, "- Ejemplo: {}", kind.example);
        if let Some(note) = kind.note {
            let _ = writeln!(out, "- MUY IMPORTANTE: {note}");
        }
        out.push('\n');
    }
    out
}

fn reply_format_block(source_word: &str) -> String {
    format!(
        "## Formato de tu respuesta

Responde usando exactamente este formato:

ENUNCIADO: (escribe aquí el enunciado principal identificado en {source_word})

ACTIVIDAD 1:
- Texto original: (transcribe aquí el texto completo de la actividad como aparece en {source_word})
- Tipo de shortcode: (nombre exacto del tipo de shortcode más adecuado)
- Shortcode generado: (escribe el shortcode completo siguiendo exactamente el formato del ejemplo)

ACTIVIDAD 2:
- Texto original: (texto de la segunda actividad)
- Tipo de shortcode: (tipo elegido)
- Shortcode generado: (shortcode completo)

Y así sucesivamente para cada actividad identificada.

NO uses formato JSON ni otro formato. Usa SOLO el formato de texto indicado.
"
    )
}

/// Build the extraction prompt for `subject`, optionally extended with the
/// user's own instructions.
///
/// For text the custom instructions come right after the task description
/// and the text itself closes the prompt; for images they close the prompt.
pub fn build_extraction_prompt(subject: PromptSubject<'_>, custom: &str) -> String {
    let mut prompt = String::from(TASK_HEADER);
    match subject {
        PromptSubject::Text(text) => {
            prompt.push_str(
                "Analiza detalladamente este texto de ejercicios educativos y extrae:\n\n\
                 1. El enunciado principal que explica el objetivo general de los ejercicios\n\
                 2. Cada actividad o pregunta individual presente en el texto\n",
            );
            prompt.push_str(&custom_block(custom));
            prompt.push('\n');
            prompt.push_str(&catalog_block());
            prompt.push_str(RULES);
            prompt.push_str(&reply_format_block("el texto"));
            prompt.push_str("\n\nAquí está el texto a analizar:\n\n");
            prompt.push_str(text);
        }
        PromptSubject::Image => {
            prompt.push_str(
                "Analiza detalladamente esta imagen de un libro de ejercicios educativos y extrae:\n\n\
                 1. El enunciado principal que explica el objetivo general de los ejercicios\n\
                 2. Cada actividad o pregunta individual presente en la imagen\n\n",
            );
            prompt.push_str(&catalog_block());
            prompt.push_str(RULES);
            prompt.push_str(&reply_format_block("la imagen"));
            prompt.push_str(&custom_block(custom));
        }
    }
    prompt
}

/// Build the prompt asking the model to revise one shortcode.
pub fn build_refinement_prompt(
    shortcode: &str,
    original_text: &str,
    declared_type: &str,
    instruction: &str,
) -> String {
    let mut formats = String::new();
    for kind in CATALOG {
        let _ = writeln!(formats, "- {}: {}", kind.name, kind.format);
    }
    let valid = kind_names().join(", ");

    format!(
        "# Tarea: Refinar un shortcode educativo existente

Necesito que refines el siguiente shortcode según las instrucciones proporcionadas:

## Texto original del ejercicio
{original_text}

## Tipo de shortcode actual
{declared_type}

## Shortcode actual
{shortcode}

## Instrucciones de refinamiento
{instruction}

## Tipos de shortcodes disponibles
El shortcode debe seguir alguno de estos formatos ({valid}):
{formats}
## Instrucciones importantes
1. Mantén el mismo tipo de shortcode a menos que la instrucción de refinamiento indique explícitamente cambiarlo
2. Sigue EXACTAMENTE la misma estructura y símbolos separadores (|, *, #, etc.)
3. Respeta el formato exacto de las comillas y corchetes
4. Incorpora las mejoras solicitadas en la instrucción de refinamiento

## Formato de tu respuesta
Proporciona tu respuesta usando exactamente este formato:

SHORTCODE REFINADO: (escribe aquí solo el shortcode refinado completo, sin comentarios adicionales)

EXPLICACIÓN: (explica brevemente los cambios realizados)
"
    )
}

/// Catalog listing shown to users: label, tag name and a sample.
pub fn render_catalog_samples() -> String {
    let mut out = String::new();
    for kind in CATALOG {
        let _ = writeln!(out, "{} ({})\n{}\n", kind.label, kind.name, kind.example);
    }
    out
}
