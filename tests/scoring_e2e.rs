// tests/scoring_e2e.rs
//
// Scoring pipeline through the public library surface:
// analyze -> score_turn -> classify -> summarize_window.

use calm_companion::{
    analyze, classify, score_turn, summarize_window, RiskAssessment, SentimentLabel, Trigger,
};

const DISTRESSED: &str = "Where am I? Leave me alone!!! My head hurts.";

fn assess(text: &str, ts: Option<&str>) -> RiskAssessment {
    let s = analyze(text);
    score_turn(s.label, s.score, &s.cues, text, ts)
}

#[test]
fn distressed_evening_utterance_scores_near_max() {
    let s = analyze(DISTRESSED);
    assert_eq!(s.label, SentimentLabel::Negative);
    assert!(s.cues.len() >= 3, "cues: {:?}", s.cues);

    let r = score_turn(s.label, s.score, &s.cues, DISTRESSED, Some("2025-06-01T19:00:00"));
    assert!(r.triggers.get(Trigger::Confusion));
    assert!(r.triggers.get(Trigger::Pain));
    assert!(r.triggers.get(Trigger::Overwhelm));
    assert!(r.risk > 0.95 && r.risk <= 1.0, "risk {}", r.risk);
    assert_eq!(r.explanation.signals.time_prior, 1.0);
    assert_eq!(r.explanation.signals.cue_count, s.cues.len());
}

#[test]
fn same_text_at_night_scores_lower() {
    let evening = assess(DISTRESSED, Some("2025-06-01T19:00:00"));
    let night = assess("Where am I? Leave me alone!!!", Some("2025-06-01T03:00:00"));
    assert_eq!(night.explanation.signals.time_prior, 0.0);
    assert!(night.risk < evening.risk);
}

#[test]
fn bounds_hold_for_varied_inputs() {
    let long = "help ".repeat(400);
    let inputs = [
        "",
        "   ",
        "I feel happy, calm and safe",
        "!!!???!!!",
        "pain pain pain hurt ache dizzy",
        long.as_str(),
        "Ça va très bien, merci",
    ];
    for text in inputs {
        let s = analyze(text);
        assert!((-1.0..=1.0).contains(&s.score), "{text:?}");
        let r = assess(text, Some("2025-06-01T17:30:00Z"));
        assert!((0.0..=1.0).contains(&r.risk), "{text:?} -> {}", r.risk);
    }
}

#[test]
fn classify_is_exhaustive() {
    let set = classify("I am lonely and bored");
    let flags: Vec<(Trigger, bool)> = set.iter().collect();
    assert_eq!(flags.len(), 9);
    for (t, on) in flags {
        let expected = matches!(t, Trigger::Loneliness | Trigger::Boredom);
        assert_eq!(on, expected, "{t}");
    }
}

#[test]
fn window_over_a_short_session() {
    let turns = vec![
        assess("I'm so bored today", None),
        assess("I'm bored and hungry", None),
        assess("where am i", None),
    ];
    let w = summarize_window(&turns);
    let mean = turns.iter().map(|t| t.risk).sum::<f64>() / 3.0;
    assert!((w.risk_avg - mean).abs() < 1e-12);
    assert_eq!(
        w.top_triggers,
        vec![Trigger::Boredom, Trigger::Physiology, Trigger::Confusion]
    );
}
