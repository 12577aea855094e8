//! Append-only shortcode history, one sequence per exercise number.

use chrono::{DateTime, Local};
use std::collections::HashMap;
use tracing::trace;

use crate::extractor::ExtractionResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcodeVersion {
    /// Informational only; ordering is append order.
    pub timestamp: DateTime<Local>,
    pub shortcode: String,
    /// `None` for the seed version.
    pub explanation: Option<String>,
}

/// Shortcode revisions for the exercises of a single extraction result.
///
/// The first version of every key is the seed recorded when the result was
/// installed; later versions only ever get appended. Callers read through
/// [`VersionStore::current`] instead of keeping copies.
#[derive(Debug, Default, Clone)]
pub struct VersionStore {
    histories: HashMap<String, Vec<ShortcodeVersion>>,
}

impl VersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the version an exercise was extracted with.
    pub fn seed(&mut self, number: &str, shortcode: &str) {
        self.push(number, shortcode, None);
    }

    pub fn append(&mut self, number: &str, shortcode: &str, explanation: Option<String>) {
        self.push(number, shortcode, explanation);
    }

    /// Drop every history and seed one version per exercise of `result`.
    ///
    /// Exercises sharing a number share a history, so the later one's
    /// shortcode becomes current for both.
    pub fn seed_all(&mut self, result: &ExtractionResult) {
        self.clear();
        for exercise in &result.exercises {
            self.seed(&exercise.number, &exercise.shortcode);
        }
    }

    /// Shortcode of the last version for `number`, or `fallback` if none.
    pub fn current<'a>(&'a self, number: &str, fallback: &'a str) -> &'a str {
        self.histories
            .get(number)
            .and_then(|versions| versions.last())
            .map_or(fallback, |v| v.shortcode.as_str())
    }

    pub fn history(&self, number: &str) -> &[ShortcodeVersion] {
        self.histories.get(number).map_or(&[], Vec::as_slice)
    }

    pub fn clear(&mut self) {
        self.histories.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    fn push(&mut self, number: &str, shortcode: &str, explanation: Option<String>) {
        let versions = self.histories.entry(number.to_string()).or_default();
        versions.push(ShortcodeVersion {
            timestamp: Local::now(),
            shortcode: shortcode.to_string(),
            explanation,
        });
        trace!(number, version = versions.len(), "shortcode version recorded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Exercise;

    fn exercise(number: &str, shortcode: &str) -> Exercise {
        Exercise {
            number: number.into(),
            original_text: format!("text {number}"),
            declared_type: "writing".into(),
            shortcode: shortcode.into(),
        }
    }

    #[test]
    fn current_falls_back_for_unknown_key() {
        let store = VersionStore::new();
        assert_eq!(store.current("1", "fallback"), "fallback");
        assert!(store.history("1").is_empty());
    }

    #[test]
    fn append_keeps_prior_versions() {
        let mut store = VersionStore::new();
        store.seed("1", "[a]");
        let before = store.history("1").to_vec();

        store.append("1", "[b]", Some("why".into()));

        let after = store.history("1");
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], before.as_slice());
        assert_eq!(after[1].explanation.as_deref(), Some("why"));
        assert_eq!(store.current("1", ""), "[b]");
    }

    #[test]
    fn seed_has_no_explanation() {
        let mut store = VersionStore::new();
        store.seed("4", "[x]");
        assert_eq!(store.history("4")[0].explanation, None);
    }

    #[test]
    fn seed_all_discards_previous_result() {
        let mut store = VersionStore::new();
        store.seed("9", "[old]");
        store.append("9", "[older]", None);

        let result = ExtractionResult {
            statement: "s".into(),
            exercises: vec![exercise("1", "[one]"), exercise("2", "[two]")],
        };
        store.seed_all(&result);

        assert!(store.history("9").is_empty());
        for ex in &result.exercises {
            assert_eq!(store.current(&ex.number, ""), ex.shortcode);
            assert_eq!(store.history(&ex.number).len(), 1);
        }
    }

    #[test]
    fn duplicate_numbers_share_one_history() {
        let result = ExtractionResult {
            statement: "s".into(),
            exercises: vec![exercise("1", "[first]"), exercise("1", "[second]")],
        };
        let mut store = VersionStore::new();
        store.seed_all(&result);
        assert_eq!(store.history("1").len(), 2);
        assert_eq!(store.current("1", ""), "[second]");
    }
}
