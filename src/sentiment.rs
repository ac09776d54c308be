//! # Lexicon sentiment
//! Counts positive/negative lexicon hits over alphabetic tokens and derives a
//! bounded score plus a three-way label. Agitation cues (see `cues.rs`)
//! dominate the neutral band: any cue forces `negative`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::cues::match_cues;

/// Word → polarity (+1 positive, -1 negative). Compiled into the binary.
static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z']+").expect("token regex"));

/// Scores at or below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.03;
/// Scores at or above this are positive (unless a cue fired).
pub const POSITIVE_THRESHOLD: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Positive => "positive",
        }
    }
}

/// Outcome of [`analyze`]. `score` is rounded to 3 decimals and lies in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f64,
    pub cues: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        *LEXICON.get(w).unwrap_or(&0)
    }

    /// Returns `(positive hits, negative hits, token count)` for lower-cased text.
    pub fn count_hits(&self, lowered: &str) -> (usize, usize, usize) {
        let mut pos = 0;
        let mut neg = 0;
        let mut n = 0;
        for tok in tokenize(lowered) {
            n += 1;
            match self.word_score(tok) {
                s if s > 0 => pos += 1,
                s if s < 0 => neg += 1,
                _ => {}
            }
        }
        (pos, neg, n)
    }

    pub fn analyze(&self, text: &str) -> SentimentResult {
        let lowered = text.to_lowercase();
        let (pos, neg, n) = self.count_hits(&lowered);
        // token count floors at 1 so empty input scores 0.0
        let raw = (pos as f64 - neg as f64) / n.max(1) as f64;
        let cues = match_cues(&lowered);

        // thresholds apply to the unrounded score
        let label = if raw <= NEGATIVE_THRESHOLD || !cues.is_empty() {
            SentimentLabel::Negative
        } else if raw >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        };

        SentimentResult {
            label,
            score: round3(raw),
            cues,
        }
    }
}

/// Score a single utterance with the built-in lexicon and cue table.
pub fn analyze(text: &str) -> SentimentResult {
    SentimentAnalyzer::new().analyze(text)
}

/// Alphabetic runs (apostrophes allowed); everything else separates tokens.
fn tokenize(lowered: &str) -> impl Iterator<Item = &str> + '_ {
    TOKEN_RE.find_iter(lowered).map(|m| m.as_str())
}

fn round3(x: f64) -> f64 {
    let r = (x * 1000.0).round() / 1000.0;
    // avoid serializing "-0.0"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral_zero() {
        let r = analyze("");
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert_eq!(r.score, 0.0);
        assert!(r.cues.is_empty());
    }

    #[test]
    fn cue_forces_negative_at_zero_score() {
        let r = analyze("where am i");
        assert_eq!(r.score, 0.0);
        assert_eq!(r.label, SentimentLabel::Negative);
        assert_eq!(r.cues.len(), 1);
    }

    #[test]
    fn positive_words_yield_positive() {
        let r = analyze("I feel calm and happy today");
        assert_eq!(r.label, SentimentLabel::Positive);
        assert!((r.score - 0.333).abs() < 1e-9, "score was {}", r.score);
    }

    #[test]
    fn whole_token_match_only() {
        // "sadness" must not count as "sad", "unhappy" not as "happy"
        let r = analyze("sadness unhappy");
        assert_eq!(r.score, 0.0);
        assert_eq!(r.label, SentimentLabel::Neutral);
    }

    #[test]
    fn negative_words_without_cues() {
        let r = analyze("I am so worried and upset");
        assert_eq!(r.label, SentimentLabel::Negative);
        assert!((r.score + 0.333).abs() < 1e-9, "score was {}", r.score);
        assert!(r.cues.is_empty());
    }

    #[test]
    fn case_insensitive_and_punctuation_separates() {
        let r = analyze("HAPPY,happy;Happy");
        assert_eq!(r.score, 1.0);
        assert_eq!(r.label, SentimentLabel::Positive);
    }

    #[test]
    fn threshold_uses_raw_score() {
        // 1 negative hit over 34 tokens = -0.0294..., rounds to -0.029 and stays neutral
        let mut text = String::from("upset");
        for _ in 0..33 {
            text.push_str(" table");
        }
        let r = analyze(&text);
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert!((r.score + 0.029).abs() < 1e-9);
    }

    #[test]
    fn score_is_bounded() {
        for t in ["sad sad sad", "happy", "!!!", "x y z", "lonely lonely"] {
            let r = analyze(t);
            assert!((-1.0..=1.0).contains(&r.score), "{t}: {}", r.score);
        }
    }
}
