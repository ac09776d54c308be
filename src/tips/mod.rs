// src/tips/mod.rs
//! Tiny retrieval engine over caregiver guidance.
//!
//! `TipIndex::build` loads the corpus and fits the TF-IDF space once; the
//! index is read-only afterwards and can be shared behind an `Arc` across
//! request handlers without locking.

pub mod corpus;
pub mod stopwords;
pub mod tfidf;

use metrics::counter;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

pub use corpus::{default_sections, load_sections, parse_sections, TipSection};
pub use tfidf::TfIdf;

pub const DEFAULT_K: usize = 3;
pub const SNIPPET_CHARS: usize = 400;
/// Stand-in document so the vector space is never empty.
pub const PLACEHOLDER_DOC: &str = "general calming support tips for caregiver";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TipMatch {
    pub title: String,
    pub snippet: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct TipIndex {
    sections: Vec<TipSection>,
    space: TfIdf,
}

impl TipIndex {
    /// Load `path` (falling back to the default tip) and fit the index.
    pub fn build(path: impl AsRef<Path>) -> Self {
        Self::from_sections(load_sections(path.as_ref()))
    }

    pub fn from_sections(sections: Vec<TipSection>) -> Self {
        let space = if sections.is_empty() {
            TfIdf::fit(&[PLACEHOLDER_DOC])
        } else {
            let bodies: Vec<&str> = sections.iter().map(|s| s.text.as_str()).collect();
            TfIdf::fit(&bodies)
        };
        info!(
            target: "tips",
            sections = sections.len(),
            terms = space.vocabulary_len(),
            "tip index built"
        );
        Self { sections, space }
    }

    pub fn sections(&self) -> &[TipSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Up to `k` best sections by cosine similarity, best first. Equal scores
    /// keep corpus order. Asking for more than the corpus holds returns all.
    pub fn query(&self, text: &str, k: usize) -> Vec<TipMatch> {
        counter!("calm_tip_queries_total").increment(1);

        let sims = self.space.similarities(text);
        let mut ranked: Vec<(usize, f64)> = sims
            .into_iter()
            .take(self.sections.len())
            .enumerate()
            .collect();
        // stable: ties stay in corpus order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let out: Vec<TipMatch> = ranked
            .into_iter()
            .take(k)
            .map(|(i, score)| {
                let s = &self.sections[i];
                TipMatch {
                    title: s.title.clone(),
                    snippet: s.text.chars().take(SNIPPET_CHARS).collect(),
                    score,
                }
            })
            .collect();
        debug!(target: "tips", k, returned = out.len(), "tip query");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TipIndex {
        TipIndex::from_sections(vec![
            TipSection::new("Music", "Play familiar music softly to soothe agitation."),
            TipSection::new("Hydration", "Offer water and a light snack; hunger and thirst raise agitation."),
            TipSection::new("Lighting", "Dim harsh lighting and reduce noise in the evening."),
        ])
    }

    #[test]
    fn best_match_first() {
        let hits = sample().query("thirst water snack", 3);
        assert_eq!(hits[0].title, "Hydration");
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn k_limits_and_caps() {
        let idx = sample();
        assert_eq!(idx.query("music", 1).len(), 1);
        assert_eq!(idx.query("music", 10).len(), 3);
        assert!(idx.query("music", 0).is_empty());
    }

    #[test]
    fn ties_keep_corpus_order() {
        let hits = sample().query("zzz unknown words", 3);
        let titles: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["Music", "Hydration", "Lighting"]);
        assert!(hits.iter().all(|h| h.score == 0.0));
    }

    #[test]
    fn snippet_is_truncated_by_chars() {
        let long = "é".repeat(1000);
        let idx = TipIndex::from_sections(vec![TipSection::new("Long", long)]);
        let hit = &idx.query("anything", 1)[0];
        assert_eq!(hit.snippet.chars().count(), SNIPPET_CHARS);
    }

    #[test]
    fn empty_corpus_answers_with_nothing() {
        let idx = TipIndex::from_sections(Vec::new());
        assert!(idx.is_empty());
        assert!(idx.query("calm", 3).is_empty());
    }

    #[test]
    fn index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TipIndex>();
    }
}
