//! session.rs — in-memory conversation store keyed by session id.
//!
//! Turns per session are capped; the oldest are dropped first. Nothing is
//! persisted across restarts.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::risk::RiskAssessment;
use crate::sentiment::SentimentResult;
use crate::tips::TipMatch;

pub const DEFAULT_SID: &str = "default";

#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub ts: String,
    pub text: String,
    pub emotion: SentimentResult,
    pub risk: RiskAssessment,
    pub reply: String,
    pub tips: Vec<TipMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub sid: String,
    pub created_at: String,
    pub turns: Vec<TurnRecord>,
}

#[derive(Debug)]
pub struct SessionStore {
    inner: Mutex<HashMap<String, Session>>,
    cap: usize,
}

/// Blank ids collapse onto [`DEFAULT_SID`].
pub fn normalize_sid(sid: &str) -> String {
    let t = sid.trim();
    if t.is_empty() {
        DEFAULT_SID.to_string()
    } else {
        t.to_string()
    }
}

impl SessionStore {
    pub fn with_turn_cap(cap: usize) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            cap: cap.max(1),
        }
    }

    /// Create the session if needed; returns its `created_at`.
    pub fn ensure(&self, sid: &str, created_at: &str) -> String {
        let mut map = self.inner.lock().expect("session mutex poisoned");
        map.entry(sid.to_string())
            .or_insert_with(|| Session {
                sid: sid.to_string(),
                created_at: created_at.to_string(),
                turns: Vec::new(),
            })
            .created_at
            .clone()
    }

    /// Append a turn (creating the session if unknown); returns the new turn count.
    pub fn append(&self, sid: &str, turn: TurnRecord) -> usize {
        let mut map = self.inner.lock().expect("session mutex poisoned");
        let sess = map.entry(sid.to_string()).or_insert_with(|| Session {
            sid: sid.to_string(),
            created_at: turn.ts.clone(),
            turns: Vec::new(),
        });
        sess.turns.push(turn);
        if sess.turns.len() > self.cap {
            let excess = sess.turns.len() - self.cap;
            sess.turns.drain(0..excess);
        }
        sess.turns.len()
    }

    pub fn last_n(&self, sid: &str, n: usize) -> Vec<TurnRecord> {
        let map = self.inner.lock().expect("session mutex poisoned");
        match map.get(sid) {
            Some(s) => {
                let start = s.turns.len().saturating_sub(n);
                s.turns[start..].to_vec()
            }
            None => Vec::new(),
        }
    }

    pub fn all(&self, sid: &str) -> Vec<TurnRecord> {
        self.get(sid).map(|s| s.turns).unwrap_or_default()
    }

    pub fn get(&self, sid: &str) -> Option<Session> {
        let map = self.inner.lock().expect("session mutex poisoned");
        map.get(sid).cloned()
    }
}
