//! TF-IDF vector space over a fixed set of documents.
//!
//! Raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, rows L2
//! normalized. Tokens are lower-cased word runs of at least two characters
//! with English stop words removed. Fitted once; queries never mutate it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

use super::stopwords::is_stop_word;

static TERM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("term regex"));

/// Sparse row: `(term index, weight)` sorted by term index.
pub type SparseVec = Vec<(usize, f64)>;

#[derive(Debug, Clone)]
pub struct TfIdf {
    vocab: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVec>,
}

impl TfIdf {
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| terms(d.as_ref())).collect();

        // alphabetical term indices keep the space deterministic
        let all: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
        let vocab: HashMap<String, usize> = all
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();

        let mut df = vec![0usize; vocab.len()];
        for doc in &tokenized {
            let uniq: BTreeSet<usize> = doc.iter().filter_map(|t| vocab.get(t).copied()).collect();
            for i in uniq {
                df[i] += 1;
            }
        }

        let n = docs.len() as f64;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let mut space = Self {
            vocab,
            idf,
            rows: Vec::new(),
        };
        let rows = tokenized.iter().map(|t| space.weigh(t)).collect();
        space.rows = rows;
        space
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocab.len()
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Project `text` into the fitted space; unknown terms are dropped.
    pub fn transform(&self, text: &str) -> SparseVec {
        self.weigh(&terms(text))
    }

    /// Cosine similarity of `text` against every fitted row, in row order.
    pub fn similarities(&self, text: &str) -> Vec<f64> {
        let q: HashMap<usize, f64> = self.transform(text).into_iter().collect();
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|(i, w)| q.get(i).map(|qw| qw * w))
                    .sum()
            })
            .collect()
    }

    fn weigh(&self, tokens: &[String]) -> SparseVec {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for t in tokens {
            if let Some(&i) = self.vocab.get(t) {
                *counts.entry(i).or_default() += 1.0;
            }
        }
        let mut row: SparseVec = counts
            .into_iter()
            .map(|(i, c)| (i, c * self.idf[i]))
            .collect();
        row.sort_by_key(|(i, _)| *i);

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut row {
                *w /= norm;
            }
        }
        row
    }
}

fn terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_scores_one() {
        let space = TfIdf::fit(&["play soft music", "offer water and a snack"]);
        let sims = space.similarities("play soft music");
        assert!((sims[0] - 1.0).abs() < 1e-9);
        assert_eq!(sims[1], 0.0);
    }

    #[test]
    fn stop_words_and_single_chars_are_ignored() {
        let space = TfIdf::fit(&["the a of x music"]);
        assert_eq!(space.vocabulary_len(), 1);
    }

    #[test]
    fn unknown_query_terms_give_zero() {
        let space = TfIdf::fit(&["dim the lights"]);
        assert!(space.transform("zebra").is_empty());
        assert_eq!(space.similarities("zebra"), vec![0.0]);
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let space = TfIdf::fit(&["calm music", "calm walk", "calm tea"]);
        let sims = space.similarities("calm music");
        assert!(sims[0] > sims[1]);
        assert!((sims[1] - sims[2]).abs() < 1e-12);
    }

    #[test]
    fn empty_corpus_vocabulary_is_not_an_error() {
        let space = TfIdf::fit(&["the and of"]);
        assert_eq!(space.rows(), 1);
        assert_eq!(space.similarities("anything at all"), vec![0.0]);
    }
}
