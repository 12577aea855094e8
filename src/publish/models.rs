//! Payloads exchanged with the content-management service.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::extractor::Exercise;

/// Languages every multilingual field carries, even when empty.
pub const LANGUAGES: &[&str] = &["es", "en", "zh"];

/// A text keyed by language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multilingual(pub BTreeMap<String, String>);

impl Multilingual {
    /// `text` under `lang`, every other known language present but empty.
    pub fn new(lang: &str, text: &str) -> Self {
        let mut map: BTreeMap<String, String> = LANGUAGES
            .iter()
            .map(|l| (l.to_string(), String::new()))
            .collect();
        map.insert(lang.to_string(), text.to_string());
        Self(map)
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }
}

/// A tag with its hierarchy flattened away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// One node of the tag tree as the service returns it. `name` is either a
/// plain string or a language map.
#[derive(Debug, Clone, Deserialize)]
pub struct TagNode {
    pub id: i64,
    #[serde(default)]
    pub name: Value,
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub children: Vec<TagNode>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagsResponse {
    List(Vec<TagNode>),
    Wrapped {
        #[serde(alias = "tags")]
        data: Vec<TagNode>,
    },
}

impl TagsResponse {
    pub fn into_nodes(self) -> Vec<TagNode> {
        match self {
            Self::List(nodes) | Self::Wrapped { data: nodes } => nodes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub name: Multilingual,
    pub statement: Multilingual,
    pub shortcode: String,
    #[serde(rename = "type")]
    pub question_type: String,
}

impl Question {
    /// Map an exercise to a question using `shortcode` as its body.
    pub fn from_exercise(exercise: &Exercise, shortcode: &str, lang: &str) -> Self {
        Self {
            name: Multilingual::new(lang, &format!("Pregunta {}", exercise.number)),
            statement: Multilingual::new(lang, &exercise.original_text),
            shortcode: shortcode.to_string(),
            question_type: exercise.declared_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewQuestionGroup {
    pub name: Multilingual,
    pub instructions: Multilingual,
    pub questions: Vec<Question>,
    pub status: String,
    pub internal_name: String,
}

/// What a publish call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishOutcome {
    pub group_id: i64,
    pub created: bool,
    pub appended: usize,
    pub skipped: usize,
}
