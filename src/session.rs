// src/session.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A single answer submitted for one question on a test page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAnswer {
    pub question_id: i64,
    pub value: String,
}

/// Server-side accumulator for in-progress test sessions.
///
/// Maps session id -> page number -> (question id -> answer text).
/// Pages are kept in a `BTreeMap` so merging walks them in ascending
/// order and later pages override earlier ones on collision.
#[derive(Clone, Default)]
pub struct TestSessionStore {
    inner: Arc<RwLock<HashMap<Uuid, BTreeMap<u32, HashMap<i64, String>>>>>,
}

impl TestSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the answers for one page, replacing anything previously
    /// recorded for that page. A duplicate question id within `answers`
    /// resolves to the last entry.
    pub async fn replace_page(&self, session_id: Uuid, page: u32, answers: Vec<PageAnswer>) {
        let map: HashMap<i64, String> = answers
            .into_iter()
            .map(|a| (a.question_id, a.value))
            .collect();

        let mut sessions = self.inner.write().await;
        sessions.entry(session_id).or_default().insert(page, map);
    }

    /// Merges the stored answer maps for pages 1..=max_page into one
    /// combined set. Later pages win on question-id collision.
    pub async fn merged_through(&self, session_id: Uuid, max_page: u32) -> HashMap<i64, String> {
        let mut combined = HashMap::new();
        if max_page == 0 {
            return combined;
        }

        let sessions = self.inner.read().await;
        if let Some(pages) = sessions.get(&session_id) {
            for (_, answers) in pages.range(1..=max_page) {
                combined.extend(answers.iter().map(|(k, v)| (*k, v.clone())));
            }
        }
        combined
    }

    /// Drops every page recorded for the session. Idempotent: clearing
    /// an unknown session is a no-op.
    pub async fn clear(&self, session_id: Uuid) {
        self.inner.write().await.remove(&session_id);
    }
}
