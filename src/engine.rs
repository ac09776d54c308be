//! # Turn Engine
//! Pure, testable pipeline that maps `(text, timestamp)` → `TurnOutcome`.
//! No I/O beyond logging and metrics, suitable for unit tests and offline
//! evaluation.
//!
//! Order: sentiment + cues → risk (with triggers) → tip query built from
//! the active triggers → template reply.

use metrics::{counter, histogram};
use serde::Serialize;
use tracing::info;

use crate::analytics::anon_hash;
use crate::reply::make_reply;
use crate::risk::{score_sentiment, RiskAssessment};
use crate::sentiment::{analyze, SentimentResult};
use crate::tips::{TipIndex, TipMatch};
use crate::triggers::TriggerSet;

pub const TIP_QUERY_SUFFIX: &str = " Alzheimer agitation caregiver tips";
pub const GENERAL_TIP_QUERY: &str = "general calm tips";

#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub sentiment: SentimentResult,
    pub assessment: RiskAssessment,
    pub tips: Vec<TipMatch>,
    pub reply: String,
}

/// Retrieval query for a trigger map.
pub fn tip_query(triggers: &TriggerSet) -> String {
    let active = triggers.active();
    if active.is_empty() {
        return GENERAL_TIP_QUERY.to_string();
    }
    let names: Vec<&str> = active.iter().map(|t| t.as_str()).collect();
    format!("{}{}", names.join(" "), TIP_QUERY_SUFFIX)
}

/// Run the whole scoring pipeline for one utterance.
pub fn assess_turn(text: &str, ts_iso: Option<&str>, tips: &TipIndex, k: usize) -> TurnOutcome {
    let sentiment = analyze(text);
    let assessment = score_sentiment(&sentiment, text, ts_iso);
    let matches = tips.query(&tip_query(&assessment.triggers), k);
    let reply = make_reply(&assessment.triggers).to_string();

    record_metrics(&assessment);

    // never log raw text
    info!(
        target: "risk",
        id = %anon_hash(text, 6),
        risk = assessment.risk,
        label = sentiment.label.as_str(),
        cues = sentiment.cues.len(),
        triggers = ?assessment.triggers.active(),
        "turn scored"
    );

    TurnOutcome {
        sentiment,
        assessment,
        tips: matches,
        reply,
    }
}

fn record_metrics(a: &RiskAssessment) {
    counter!("calm_turns_scored_total").increment(1);
    histogram!("calm_turn_risk").record(a.risk);
    for t in a.triggers.active() {
        counter!("calm_trigger_hits_total", "trigger" => t.as_str()).increment(1);
    }
}
