//! Recover a structured exercise list from a free-form model reply.
//!
//! The reply is expected to follow the labelled layout requested by
//! [`crate::ai::prompts`], but nothing here relies on it: a reply with no
//! recognisable labels yields [`NO_STATEMENT`] and an empty exercise list.
//! The `regex` crate has no look-around, so every "runs until the next
//! label" rule is expressed by cutting the input at label positions first
//! and matching inside the resulting slices.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Statement used when the reply carries no recognisable statement label.
pub const NO_STATEMENT: &str = "No se encontró un enunciado claro";

static STATEMENT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ENUNCIADO:\s*").expect("valid statement regex"));

static ALT_STATEMENT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:ENUNCIADO|ENUNCIADO PRINCIPAL|INSTRUCCIÓN):\s*")
        .expect("valid alternate statement regex")
});

static STATEMENT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ACTIVIDAD").expect("valid statement end regex"));

static EXERCISE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ACTIVIDAD\s+(\d+):").expect("valid header regex"));

static EXERCISE_FIELDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?is)\A\s*(?:[-*•]\s*)?Texto original:\s*(.*?)",
        r"\s*(?:[-*•]\s*)?Tipo de shortcode:\s*(.*?)",
        r"\s*(?:[-*•]\s*)?Shortcode generado:\s*(.*)\z",
    ))
    .expect("valid exercise fields regex")
});

static LOOSE_INTRODUCER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ACTIVIDAD|EJERCICIO|PREGUNTA").expect("valid introducer regex")
});

static LOOSE_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?is)\A(?:ACTIVIDAD|EJERCICIO|PREGUNTA)\s*(?:\d+)?:?\s*(.*?)",
        r"[\r\n]+(?:TIPO|SHORTCODE):?\s*(.*?)",
        r"[\r\n]+(?:SHORTCODE|CÓDIGO):?\s*",
    ))
    .expect("valid loose head regex")
});

/// One exercise as first produced by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    /// Opaque label from the reply; not coerced to an integer.
    pub number: String,
    pub original_text: String,
    pub declared_type: String,
    pub shortcode: String,
}

/// Everything recovered from a single reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub statement: String,
    pub exercises: Vec<Exercise>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// First exercise carrying `number`.
    pub fn exercise(&self, number: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.number == number)
    }
}

/// Parse a reply into a statement and an ordered exercise list.
///
/// Never fails. When the labelled `ACTIVIDAD <n>:` layout yields nothing, a
/// looser layout is tried whose exercises are numbered from 1 in encounter
/// order, whatever numbers the text carries.
pub fn extract(text: &str) -> ExtractionResult {
    let statement = extract_statement(text);

    let mut exercises = extract_labelled(text);
    if exercises.is_empty() {
        exercises = extract_loose(text);
        if !exercises.is_empty() {
            debug!(count = exercises.len(), "exercises recovered with loose layout");
        }
    }

    debug!(
        count = exercises.len(),
        statement_found = statement != NO_STATEMENT,
        "extraction finished"
    );
    ExtractionResult {
        statement,
        exercises,
    }
}

fn extract_statement(text: &str) -> String {
    section_until_exercise(&STATEMENT_LABEL, text)
        .or_else(|| section_until_exercise(&ALT_STATEMENT_LABEL, text))
        .unwrap_or_else(|| NO_STATEMENT.to_string())
}

fn section_until_exercise(label: &Regex, text: &str) -> Option<String> {
    let found = label.find(text)?;
    let rest = &text[found.end()..];
    let end = STATEMENT_END.find(rest).map_or(rest.len(), |m| m.start());
    Some(rest[..end].trim().to_string())
}

fn extract_labelled(text: &str) -> Vec<Exercise> {
    let headers: Vec<(usize, usize, &str)> = EXERCISE_HEADER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let number = caps.get(1)?;
            Some((whole.start(), whole.end(), number.as_str()))
        })
        .collect();

    let mut exercises = Vec::with_capacity(headers.len());
    for (idx, &(_, body_start, number)) in headers.iter().enumerate() {
        let body_end = headers
            .get(idx + 1)
            .map_or(text.len(), |&(next_start, _, _)| next_start);
        let block = &text[body_start..body_end];

        let Some(caps) = EXERCISE_FIELDS.captures(block) else {
            trace!(number, "exercise block without the three fields; skipped");
            continue;
        };
        exercises.push(Exercise {
            number: number.to_string(),
            original_text: group_trimmed(&caps, 1),
            declared_type: group_trimmed(&caps, 2),
            shortcode: group_trimmed(&caps, 3),
        });
    }
    exercises
}

fn extract_loose(text: &str) -> Vec<Exercise> {
    let starts: Vec<usize> = LOOSE_INTRODUCER
        .find_iter(text)
        .map(|m| m.start())
        .collect();

    let mut exercises = Vec::new();
    let mut cursor = 0;
    for &start in &starts {
        if start < cursor {
            continue;
        }
        let Some(caps) = LOOSE_HEAD.captures(&text[start..]) else {
            continue;
        };
        let body_start = start + caps.get(0).map_or(0, |m| m.end());
        let body_end = starts
            .iter()
            .copied()
            .find(|&s| s >= body_start)
            .unwrap_or(text.len());

        exercises.push(Exercise {
            number: (exercises.len() + 1).to_string(),
            original_text: group_trimmed(&caps, 1),
            declared_type: group_trimmed(&caps, 2),
            shortcode: text[body_start..body_end].trim().to_string(),
        });
        cursor = body_end;
    }
    exercises
}

fn group_trimmed(caps: &regex::Captures<'_>, idx: usize) -> String {
    caps.get(idx)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
