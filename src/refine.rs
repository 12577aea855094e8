//! Revise one exercise's shortcode from a natural-language instruction and
//! commit the outcome to the version store.
//!
//! Histories are strictly linear: each successful refinement appends one
//! version on top of the current one, and a failed refinement appends
//! nothing.

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::ai::prompts::build_refinement_prompt;
use crate::ai::{AnthropicClient, CompletionError};
use crate::extractor::ExtractionResult;
use crate::versions::VersionStore;

const SHORTCODE_LABEL: &str = "SHORTCODE REFINADO:";
const EXPLANATION_LABEL: &str = "EXPLICACIÓN:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinedShortcode {
    pub shortcode: String,
    /// `None` when the reply had no explanation section, `Some("")` when
    /// the section was present but empty.
    pub explanation: Option<String>,
}

#[derive(Debug, Error)]
pub enum RefineError {
    #[error("nothing has been extracted yet")]
    NoResult,

    #[error("there is no exercise {0} in the current result")]
    UnknownExercise(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("the model reply did not contain a refined shortcode")]
    MissingShortcode,
}

/// Split a refinement reply into its shortcode and explanation sections.
///
/// Returns `None` when there is no shortcode section or it is empty.
pub fn parse_refinement_reply(reply: &str) -> Option<RefinedShortcode> {
    let start = reply.find(SHORTCODE_LABEL)? + SHORTCODE_LABEL.len();
    let rest = &reply[start..];
    let end = rest.find(EXPLANATION_LABEL).unwrap_or(rest.len());
    let shortcode = rest[..end].trim();
    if shortcode.is_empty() {
        return None;
    }

    let explanation = reply
        .find(EXPLANATION_LABEL)
        .map(|at| reply[at + EXPLANATION_LABEL.len()..].trim().to_string());

    Some(RefinedShortcode {
        shortcode: shortcode.to_string(),
        explanation,
    })
}

/// Ask the model for a revised shortcode without touching any state.
#[instrument(level = "trace", skip(client, shortcode, original_text))]
pub async fn request_refinement(
    client: &AnthropicClient,
    shortcode: &str,
    original_text: &str,
    declared_type: &str,
    instruction: &str,
    max_tokens: u32,
) -> Result<RefinedShortcode, RefineError> {
    let prompt = build_refinement_prompt(shortcode, original_text, declared_type, instruction);
    let reply = client.complete(&prompt, None, max_tokens).await?;
    parse_refinement_reply(&reply).ok_or_else(|| {
        warn!("refinement reply without a shortcode section");
        RefineError::MissingShortcode
    })
}

/// Refine exercise `number` starting from its current version and append
/// the result to `versions`.
///
/// `versions` is only written after a usable reply has been parsed.
pub async fn refine_exercise(
    client: &AnthropicClient,
    result: Option<&ExtractionResult>,
    versions: &mut VersionStore,
    number: &str,
    instruction: &str,
    max_tokens: u32,
) -> Result<RefinedShortcode, RefineError> {
    let result = result.ok_or(RefineError::NoResult)?;
    let exercise = result
        .exercise(number)
        .ok_or_else(|| RefineError::UnknownExercise(number.to_string()))?;

    let current = versions.current(number, &exercise.shortcode).to_string();
    debug!(number, "refining shortcode");

    let refined = request_refinement(
        client,
        &current,
        &exercise.original_text,
        &exercise.declared_type,
        instruction,
        max_tokens,
    )
    .await?;

    versions.append(number, &refined.shortcode, refined.explanation.clone());
    info!(
        number,
        versions = versions.history(number).len(),
        "refined shortcode committed"
    );
    Ok(refined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_sections() {
        let reply = "SHORTCODE REFINADO: [writing maxtime=\"5\"][/writing]\n\nEXPLICACIÓN: Añadido límite.\n";
        assert_eq!(
            parse_refinement_reply(reply),
            Some(RefinedShortcode {
                shortcode: "[writing maxtime=\"5\"][/writing]".into(),
                explanation: Some("Añadido límite.".into()),
            })
        );
    }

    #[test]
    fn explanation_is_optional() {
        let parsed = parse_refinement_reply("Sure!\nSHORTCODE REFINADO:\n[a][/a]\n").unwrap();
        assert_eq!(parsed.shortcode, "[a][/a]");
        assert_eq!(parsed.explanation, None);
    }

    #[test]
    fn empty_explanation_differs_from_missing() {
        let parsed = parse_refinement_reply("SHORTCODE REFINADO: [a][/a]\nEXPLICACIÓN:   ").unwrap();
        assert_eq!(parsed.explanation, Some(String::new()));
    }

    #[test]
    fn missing_or_empty_shortcode_is_no_result() {
        assert_eq!(parse_refinement_reply("EXPLICACIÓN: nada"), None);
        assert_eq!(
            parse_refinement_reply("SHORTCODE REFINADO:\n\nEXPLICACIÓN: vacío"),
            None
        );
    }

    #[test]
    fn multiline_shortcode_is_kept() {
        let parsed =
            parse_refinement_reply("SHORTCODE REFINADO: [a\nb][/a]\nEXPLICACIÓN: x").unwrap();
        assert_eq!(parsed.shortcode, "[a\nb][/a]");
    }
}
