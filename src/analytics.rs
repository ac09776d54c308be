//! # Analytics
//! Bounded in-memory log of anonymized turn snapshots plus on-demand
//! aggregates for dashboards. Raw text never enters a record, only a short
//! SHA-256 prefix.

use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt::Write as _;
use std::sync::Mutex;
use tracing::debug;

use crate::rolling::WindowSummary;
use crate::sentiment::SentimentLabel;
use crate::session::TurnRecord;
use crate::triggers::{Trigger, TriggerSet};

const REPLY_PREVIEW_CHARS: usize = 120;
const TOP_TRIGGERS_PER_DAY: usize = 5;

/// Hex of the first `bytes` bytes of SHA-256(`text`).
pub fn anon_hash(text: &str, bytes: usize) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(bytes * 2);
    for b in digest.iter().take(bytes) {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnContext {
    pub summary: Option<WindowSummary>,
    pub tips_count: usize,
    pub reply_preview: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsRecord {
    pub sid: String,
    pub ts: String,
    pub turn_ts: String,
    pub turn_hash: String,
    pub mood: SentimentLabel,
    pub mood_score: f64,
    pub risk: f64,
    pub triggers: TriggerSet,
    pub context: TurnContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct TriggerCount {
    pub trigger: Trigger,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateMetrics {
    pub total_turns: usize,
    pub sessions_tracked: usize,
    pub mood_counts: BTreeMap<SentimentLabel, usize>,
    pub avg_risk: f64,
    pub triggers_by_day: BTreeMap<String, Vec<TriggerCount>>,
    pub generated_at: String,
}

#[derive(Debug)]
pub struct Analytics {
    records: Mutex<VecDeque<AnalyticsRecord>>,
    cap: usize,
}

impl Analytics {
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            records: Mutex::new(VecDeque::with_capacity(cap.min(10_000))),
            cap,
        }
    }

    pub fn record_turn(
        &self,
        sid: &str,
        turn: &TurnRecord,
        summary: Option<WindowSummary>,
    ) -> AnalyticsRecord {
        let entry = AnalyticsRecord {
            sid: sid.to_string(),
            ts: Utc::now().to_rfc3339(),
            turn_ts: turn.ts.clone(),
            turn_hash: anon_hash(&turn.text, 8),
            mood: turn.emotion.label,
            mood_score: turn.emotion.score,
            risk: turn.risk.risk,
            triggers: turn.risk.triggers,
            context: TurnContext {
                summary,
                tips_count: turn.tips.len(),
                reply_preview: turn.reply.chars().take(REPLY_PREVIEW_CHARS).collect(),
            },
        };
        debug!(target: "analytics", sid, id = %entry.turn_hash, risk = entry.risk, "turn recorded");

        let mut q = self.records.lock().expect("analytics mutex poisoned");
        q.push_back(entry.clone());
        while q.len() > self.cap {
            q.pop_front();
        }
        entry
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("analytics mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn aggregate(&self) -> AggregateMetrics {
        let data: Vec<AnalyticsRecord> = {
            let q = self.records.lock().expect("analytics mutex poisoned");
            q.iter().cloned().collect()
        };

        let mut mood_counts = BTreeMap::new();
        let mut sids = HashSet::new();
        let mut risk_sum = 0.0;
        // per day: counts in first-seen order
        let mut per_day: BTreeMap<String, Vec<(Trigger, usize)>> = BTreeMap::new();

        for r in &data {
            *mood_counts.entry(r.mood).or_insert(0) += 1;
            sids.insert(r.sid.as_str());
            risk_sum += r.risk;

            let day: String = r.turn_ts.chars().take(10).collect();
            if day.is_empty() {
                continue;
            }
            let counts = per_day.entry(day).or_default();
            for t in r.triggers.active() {
                match counts.iter_mut().find(|(seen, _)| *seen == t) {
                    Some((_, c)) => *c += 1,
                    None => counts.push((t, 1)),
                }
            }
        }

        let triggers_by_day = per_day
            .into_iter()
            .filter(|(_, c)| !c.is_empty())
            .map(|(day, mut counts)| {
                counts.sort_by(|a, b| b.1.cmp(&a.1));
                let top = counts
                    .into_iter()
                    .take(TOP_TRIGGERS_PER_DAY)
                    .map(|(trigger, count)| TriggerCount { trigger, count })
                    .collect();
                (day, top)
            })
            .collect();

        AggregateMetrics {
            total_turns: data.len(),
            sessions_tracked: sids.len(),
            mood_counts,
            avg_risk: if data.is_empty() {
                0.0
            } else {
                risk_sum / data.len() as f64
            },
            triggers_by_day,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}
