//! # Rolling Window
//! Stateless summary over the most recent turns of a session: average risk
//! and the dominant triggers. The caller decides the window (usually the last
//! `summary_window` turns); nothing is stored here.

use serde::Serialize;

use crate::risk::RiskAssessment;
use crate::triggers::Trigger;

/// How many trigger names a summary reports at most.
pub const TOP_TRIGGERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub risk_avg: f64,
    pub top_triggers: Vec<Trigger>,
}

impl WindowSummary {
    pub fn empty() -> Self {
        Self {
            risk_avg: 0.0,
            top_triggers: Vec::new(),
        }
    }
}

/// Summarize `turns` (oldest first).
///
/// Ties in trigger counts keep the order in which a trigger was first seen
/// active while walking the window.
pub fn summarize_window<'a, I>(turns: I) -> WindowSummary
where
    I: IntoIterator<Item = &'a RiskAssessment>,
{
    let mut sum = 0.0;
    let mut n: usize = 0;
    // first-seen order; the window is tiny so a Vec beats a map here
    let mut counts: Vec<(Trigger, usize)> = Vec::new();

    for turn in turns {
        sum += turn.risk;
        n += 1;
        for t in turn.triggers.active() {
            match counts.iter_mut().find(|(seen, _)| *seen == t) {
                Some((_, c)) => *c += 1,
                None => counts.push((t, 1)),
            }
        }
    }

    if n == 0 {
        return WindowSummary::empty();
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    WindowSummary {
        risk_avg: sum / n as f64,
        top_triggers: counts
            .into_iter()
            .take(TOP_TRIGGERS)
            .map(|(t, _)| t)
            .collect(),
    }
}
