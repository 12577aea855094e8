//! Plain-text export of a result using the current shortcode versions.

use crate::extractor::ExtractionResult;
use crate::versions::VersionStore;

pub const DEFAULT_EXPORT_FILENAME: &str = "resultados_analisis.txt";

/// Render the statement and every exercise with its current shortcode.
pub fn export_text(result: &ExtractionResult, versions: &VersionStore) -> String {
    let mut text = format!("ENUNCIADO Principal\n{}\n\n", result.statement);
    for exercise in &result.exercises {
        let number = &exercise.number;
        let shortcode = versions.current(number, &exercise.shortcode);
        text.push_str(&format!(
            "ENUNCIADO Pregunta {number}\n{}\n\n",
            exercise.original_text
        ));
        text.push_str(&format!("SHORTCODE Pregunta {number}\n{shortcode}\n\n"));
    }
    text
}

/// Current shortcodes only, separated by a blank line.
pub fn all_current_shortcodes(result: &ExtractionResult, versions: &VersionStore) -> String {
    result
        .exercises
        .iter()
        .map(|e| versions.current(&e.number, &e.shortcode))
        .collect::<Vec<_>>()
        .join("\n\n")
}
