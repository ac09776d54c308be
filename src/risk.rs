//! # Risk aggregation
//! Weighted, clamped combination of four signals:
//!
//! ```text
//! risk = W_NEG  * min(1, |sentiment| * 3)     (negative label only)
//!      + W_CUES * min(1, cue_count / 3)
//!      + W_LEN  * min(1, chars / 200)
//!      + W_TIME * time_prior(ts)              (only when a timestamp is given)
//! ```
//!
//! The explanation payload carries the raw inputs so every score can be
//! audited after the fact.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::sentiment::{SentimentLabel, SentimentResult};
use crate::triggers::{classify, TriggerSet};

pub const W_NEG: f64 = 0.6;
pub const W_CUES: f64 = 0.8;
pub const W_LEN: f64 = 0.1;
/// Time-of-day prior (sundowning).
pub const W_TIME: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signals {
    pub sentiment: SentimentLabel,
    pub sentiment_score: f64,
    pub cue_count: usize,
    pub time_prior: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub signals: Signals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Always within [0, 1].
    pub risk: f64,
    pub triggers: TriggerSet,
    pub explanation: Explanation,
}

/// Score one turn. `ts_iso` of `None` (or an empty string) leaves the time
/// term at zero.
pub fn score_turn(
    label: SentimentLabel,
    sentiment_score: f64,
    cues: &[String],
    text: &str,
    ts_iso: Option<&str>,
) -> RiskAssessment {
    let ts = ts_iso.filter(|s| !s.is_empty());
    let prior = ts.map(time_prior).unwrap_or(0.0);

    let mut base = 0.0;
    if label == SentimentLabel::Negative {
        base += W_NEG * (sentiment_score.abs() * 3.0).min(1.0);
    }
    base += W_CUES * (cues.len() as f64 / 3.0).min(1.0);
    base += W_LEN * (text.chars().count() as f64 / 200.0).min(1.0);
    base += W_TIME * prior;

    RiskAssessment {
        risk: base.clamp(0.0, 1.0),
        triggers: classify(text),
        explanation: Explanation {
            signals: Signals {
                sentiment: label,
                sentiment_score,
                cue_count: cues.len(),
                time_prior: prior,
            },
        },
    }
}

/// Convenience wrapper over [`score_turn`] for an already analyzed utterance.
pub fn score_sentiment(sent: &SentimentResult, text: &str, ts_iso: Option<&str>) -> RiskAssessment {
    score_turn(sent.label, sent.score, &sent.cues, text, ts_iso)
}

/// Evening bump: 1.0 for 16..=22h, 0.5 for 14..16h and 23h, else 0.0.
///
/// The hour is read as written in the timestamp (no offset conversion).
/// Unparseable input falls back to the current local hour.
pub fn time_prior(ts_iso: &str) -> f64 {
    let hour = parse_hour(ts_iso).unwrap_or_else(|| Local::now().hour());
    prior_for_hour(hour)
}

pub fn prior_for_hour(hour: u32) -> f64 {
    match hour {
        16..=22 => 1.0,
        14 | 15 | 23 => 0.5,
        _ => 0.0,
    }
}

/// Wall-clock hour of an ISO-8601 timestamp, if it parses.
pub fn parse_hour(ts_iso: &str) -> Option<u32> {
    let s = ts_iso.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.hour());
    }
    let naive = s.strip_suffix('Z').unwrap_or(s);
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(dt.hour());
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(naive, fmt) {
            return Some(dt.hour());
        }
    }
    // a bare date is midnight
    NaiveDate::parse_from_str(naive, "%Y-%m-%d").ok().map(|_| 0)
}
