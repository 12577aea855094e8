//! Per-chat working context.
//!
//! A [`Session`] owns the current extraction result together with its
//! version store; the two are always replaced together. [`Sessions`] hands
//! out one lock per chat so that every operation on a chat (extract, refine,
//! export, publish) runs to completion before the next one starts, while
//! other chats proceed independently.

use chrono::{DateTime, Local};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use teloxide::types::ChatId;
use tokio::sync::Mutex;

use crate::extractor::ExtractionResult;
use crate::versions::VersionStore;

const MAX_ACTIVITY: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub timestamp: DateTime<Local>,
    pub event: String,
    pub details: Option<String>,
}

#[derive(Debug, Default)]
pub struct Session {
    pub result: Option<ExtractionResult>,
    pub versions: VersionStore,
    /// Extra instructions appended to every extraction prompt.
    pub custom_prompt: String,
    /// Full text of the last extraction reply.
    pub last_reply: Option<String>,
    pub image_url: Option<String>,
    /// Group the current result was published to, if any.
    pub published_group: Option<i64>,
    activity: VecDeque<Activity>,
}

impl Session {
    /// Replace the current result and reseed the store from it.
    pub fn install(&mut self, result: ExtractionResult, reply: String) {
        self.versions.seed_all(&result);
        self.result = Some(result);
        self.last_reply = Some(reply);
        self.published_group = None;
    }

    /// Forget everything, keeping only a log entry about the reset.
    pub fn reset(&mut self) {
        *self = Self::default();
        self.record("Session reset", None);
    }

    pub fn record(&mut self, event: impl Into<String>, details: Option<String>) {
        if self.activity.len() >= MAX_ACTIVITY {
            self.activity.pop_front();
        }
        self.activity.push_back(Activity {
            timestamp: Local::now(),
            event: event.into(),
            details,
        });
    }

    /// Oldest entry first.
    pub fn activity(&self) -> &VecDeque<Activity> {
        &self.activity
    }
}

/// Sessions keyed by chat. Entries live until the process exits.
#[derive(Clone, Default)]
pub struct Sessions {
    inner: Arc<Mutex<HashMap<ChatId, Arc<Mutex<Session>>>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for `chat`, created empty on first use.
    pub async fn get(&self, chat: ChatId) -> Arc<Mutex<Session>> {
        let mut map = self.inner.lock().await;
        map.entry(chat).or_default().clone()
    }
}
