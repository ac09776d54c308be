//! # Agitation cues
//! Fixed, ordered regex patterns that signal acute distress.
//!
//! A matched cue forces the sentiment label to `negative` and each match
//! counts towards the cue term of the risk score. The table is compiled once
//! and never mutated; its vocabulary overlaps with the trigger keywords in
//! `triggers.rs` on purpose, the two tables stay separate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern sources in evaluation order. Patterns are disjoint, so a single
/// utterance never reports the same cue twice.
pub const AGITATION_CUES: [&str; 9] = [
    // disorientation
    r"\b(where am i|what is this place|who are you)\b",
    // refusal
    r"\b(leave me alone|get away|stop it)\b",
    r"\b(i (won't|dont) want to|no i (won't|dont))\b",
    // repeated punctuation
    r"!!!|\?\?\?",
    // somatic complaints
    r"\b(pain|hurt|ache|dizzy|headache|nausea|itchy|burning|fever|shiver)\b",
    // memory loss
    r"\b(i'm lost|i am lost|can't remember|don'?t remember)\b",
    // environmental overload
    r"\b(too loud|too bright|too dark|crowd|crowded|noisy|clutter)\b",
    // physiological needs
    r"\b(thirsty|hungry|bathroom|tired|sleepy|cold|hot|weak)\b",
    // fear
    r"\b(scared|afraid|anxious|lonely|embarrassed|paranoid)\b",
];

static COMPILED: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    AGITATION_CUES
        .iter()
        .map(|p| (*p, Regex::new(p).expect("valid agitation cue regex")))
        .collect()
});

/// Return the source of every cue pattern found in `lowered`, in table order.
///
/// The caller is expected to pass lower-cased text; patterns are written in
/// lower case and carry no case-insensitive flag.
pub fn match_cues(lowered: &str) -> Vec<String> {
    COMPILED
        .iter()
        .filter(|(_, re)| re.is_match(lowered))
        .map(|(src, _)| (*src).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        assert_eq!(COMPILED.len(), AGITATION_CUES.len());
    }

    #[test]
    fn disorientation_and_refusal_match_in_order() {
        let cues = match_cues("where am i? leave me alone!!!");
        assert_eq!(cues, vec![AGITATION_CUES[0], AGITATION_CUES[1], AGITATION_CUES[3]]);
    }

    #[test]
    fn whole_words_only_for_somatic_terms() {
        // "hurts" is not the whole word "hurt"
        assert!(match_cues("my head hurts").is_empty());
        assert_eq!(match_cues("it hurt so much"), vec![AGITATION_CUES[4]]);
    }

    #[test]
    fn memory_loss_accepts_missing_apostrophe() {
        assert_eq!(match_cues("i dont remember"), vec![AGITATION_CUES[5]]);
        assert_eq!(match_cues("i don't remember"), vec![AGITATION_CUES[5]]);
    }

    #[test]
    fn calm_text_has_no_cues() {
        assert!(match_cues("what a lovely morning in the garden").is_empty());
        assert!(match_cues("").is_empty());
    }
}
