use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, instrument, trace, warn};

use super::config::PublishConfig;
use super::error::PublishError;
use super::models::{Multilingual, NewQuestionGroup, PublishOutcome, Question, Tag, TagsResponse};
use super::tags::{flatten_tags, slugify};
use crate::ai::error::error_detail;
use crate::extractor::ExtractionResult;
use crate::versions::VersionStore;

/// REST client for the question-group service.
#[derive(Clone)]
pub struct PublishClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    language: String,
    group_status: String,
}

async fn ensure_success(resp: Response) -> Result<Response, PublishError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    warn!(%status, "publishing service error");
    Err(PublishError::Status {
        status: status.as_u16(),
        detail: error_detail(&body),
    })
}

async fn read_json(resp: Response) -> Result<Value, PublishError> {
    let raw = ensure_success(resp).await?.text().await?;
    trace!(raw = %raw, "publishing service response");
    Ok(serde_json::from_str(&raw)?)
}

/// Unwrap `{"data": {...}}` envelopes.
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

fn group_id(value: &Value) -> Option<i64> {
    match value.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Add `questions` to a fetched group, skipping shortcodes it already
/// holds. Returns the update payload and how many questions were added.
///
/// Other fields are carried over untouched except blank ones, which are
/// left out of the payload.
pub fn merge_questions(group: Value, questions: &[Question]) -> Result<(Value, usize), PublishError> {
    let mut group = match group {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    let mut existing: Vec<Value> = match group.remove("questions") {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    let mut seen: HashSet<String> = existing
        .iter()
        .filter_map(|q| q.get("shortcode").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    let mut added = 0;
    for question in questions {
        if !seen.insert(question.shortcode.clone()) {
            continue;
        }
        existing.push(serde_json::to_value(question)?);
        added += 1;
    }

    group.retain(|_, v| !is_blank(v));
    group.insert("questions".to_string(), Value::Array(existing));
    Ok((Value::Object(group), added))
}

impl PublishClient {
    pub fn new(config: &PublishConfig) -> Result<Self, PublishError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            group_status: config.group_status.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// All tags, flattened. Tries without credentials first.
    #[instrument(level = "trace", skip(self))]
    pub async fn list_tags(&self) -> Result<Vec<Tag>, PublishError> {
        let url = self.url("/api/tags");
        let mut resp = self.http.get(&url).send().await?;
        if matches!(resp.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
            && self.api_key.is_some()
        {
            debug!(status = %resp.status(), "tags require authentication, retrying");
            resp = self.authorize(self.http.get(&url)).send().await?;
        }
        let value = read_json(resp).await?;
        let nodes = serde_json::from_value::<TagsResponse>(value)?.into_nodes();
        let tags = flatten_tags(&nodes, &self.language);
        debug!(count = tags.len(), "fetched tags");
        Ok(tags)
    }

    /// Create an empty group and return its id.
    #[instrument(level = "trace", skip(self, instructions))]
    pub async fn create_group(&self, name: &str, instructions: &str) -> Result<i64, PublishError> {
        let payload = NewQuestionGroup {
            name: Multilingual::new(&self.language, name),
            instructions: Multilingual::new(&self.language, instructions),
            questions: Vec::new(),
            status: self.group_status.clone(),
            internal_name: slugify(name),
        };
        let resp = self
            .authorize(self.http.post(self.url("/api/questiongroups")))
            .json(&payload)
            .send()
            .await?;
        let value = unwrap_data(read_json(resp).await?);
        let id = group_id(&value).ok_or(PublishError::MissingGroupId)?;
        info!(id, "created question group");
        Ok(id)
    }

    /// Append `questions` to group `id`; returns how many were added.
    #[instrument(level = "trace", skip(self, questions), fields(count = questions.len()))]
    pub async fn append_questions(
        &self,
        id: i64,
        questions: &[Question],
    ) -> Result<usize, PublishError> {
        let url = self.url(&format!("/api/questiongroups/{id}"));
        let resp = self.authorize(self.http.get(&url)).send().await?;
        let group = unwrap_data(read_json(resp).await?);

        let (payload, added) = merge_questions(group, questions)?;
        if added == 0 {
            debug!(id, "every question already present, nothing to update");
            return Ok(0);
        }

        let resp = self
            .authorize(self.http.put(&url))
            .json(&payload)
            .send()
            .await?;
        ensure_success(resp).await?;
        info!(id, added, "appended questions");
        Ok(added)
    }

    /// Publish every exercise with its current shortcode, creating a group
    /// named `name` unless `group` is given.
    pub async fn publish(
        &self,
        result: Option<&ExtractionResult>,
        versions: &VersionStore,
        group: Option<i64>,
        name: &str,
    ) -> Result<PublishOutcome, PublishError> {
        let result = result
            .filter(|r| !r.exercises.is_empty())
            .ok_or(PublishError::NothingToPublish)?;
        let questions: Vec<Question> = result
            .exercises
            .iter()
            .map(|e| {
                Question::from_exercise(e, versions.current(&e.number, &e.shortcode), &self.language)
            })
            .collect();

        let (group_id, created) = match group {
            Some(id) => (id, false),
            None => (self.create_group(name, &result.statement).await?, true),
        };
        let appended = match self.append_questions(group_id, &questions).await {
            Ok(appended) => appended,
            Err(err) if created => {
                warn!(group_id, error = %err, "group created but append failed");
                return Err(PublishError::AppendFailed {
                    group_id,
                    source: Box::new(err),
                });
            }
            Err(err) => return Err(err),
        };
        Ok(PublishOutcome {
            group_id,
            created,
            appended,
            skipped: questions.len() - appended,
        })
    }
}
