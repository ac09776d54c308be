//! # Trigger classifier
//! Maps text onto nine fixed behavioral trigger categories by keyword
//! substring match. Unlike cues, this is plain `contains` on the lower-cased
//! text, so "hurts" trips `pain` via "hurt".

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Confusion,
    Pain,
    Loneliness,
    Overwhelm,
    Boredom,
    Routine,
    Environment,
    Physiology,
    Anxiety,
}

impl Trigger {
    /// Every trigger in its canonical order.
    pub const ALL: [Trigger; 9] = [
        Trigger::Confusion,
        Trigger::Pain,
        Trigger::Loneliness,
        Trigger::Overwhelm,
        Trigger::Boredom,
        Trigger::Routine,
        Trigger::Environment,
        Trigger::Physiology,
        Trigger::Anxiety,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Confusion => "confusion",
            Trigger::Pain => "pain",
            Trigger::Loneliness => "loneliness",
            Trigger::Overwhelm => "overwhelm",
            Trigger::Boredom => "boredom",
            Trigger::Routine => "routine",
            Trigger::Environment => "environment",
            Trigger::Physiology => "physiology",
            Trigger::Anxiety => "anxiety",
        }
    }

    /// Keyword phrases; any one of them as a substring activates the trigger.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Trigger::Confusion => &[
                "where am i",
                "who are you",
                "don't remember",
                "can't remember",
                "lost",
            ],
            Trigger::Pain => &[
                "pain", "hurt", "ache", "dizzy", "headache", "burning", "nausea",
            ],
            Trigger::Loneliness => &["alone", "lonely"],
            Trigger::Overwhelm => &["stop it", "leave me alone", "get away"],
            Trigger::Boredom => &["bored"],
            Trigger::Routine => &["don't want to", "won't", "no i don't", "no i wont"],
            Trigger::Environment => &[
                "too loud",
                "noisy",
                "crowd",
                "crowded",
                "too bright",
                "too dark",
                "clutter",
                "hot",
                "cold",
            ],
            Trigger::Physiology => &["thirsty", "hungry", "bathroom", "tired", "sleepy", "weak"],
            Trigger::Anxiety => &["scared", "afraid", "anxious", "paranoid"],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flag per trigger; always exhaustive. Serializes as an ordered
/// `{"confusion": bool, ...}` map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerSet {
    flags: [bool; 9],
}

impl TriggerSet {
    pub fn get(&self, t: Trigger) -> bool {
        self.flags[t.index()]
    }

    pub fn set(&mut self, t: Trigger, on: bool) {
        self.flags[t.index()] = on;
    }

    /// `(trigger, flag)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Trigger, bool)> + '_ {
        Trigger::ALL.iter().map(move |t| (*t, self.get(*t)))
    }

    /// Active triggers in canonical order.
    pub fn active(&self) -> Vec<Trigger> {
        self.iter().filter(|(_, on)| *on).map(|(t, _)| t).collect()
    }

    pub fn any(&self) -> bool {
        self.flags.iter().any(|f| *f)
    }
}

impl Serialize for TriggerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Trigger::ALL.len()))?;
        for (t, on) in self.iter() {
            map.serialize_entry(t.as_str(), &on)?;
        }
        map.end()
    }
}

/// Classify `text` into the full trigger map.
pub fn classify(text: &str) -> TriggerSet {
    let low = text.to_lowercase();
    let mut set = TriggerSet::default();
    for t in Trigger::ALL {
        if t.keywords().iter().any(|kw| low.contains(kw)) {
            set.set(t, true);
        }
    }
    set
}
