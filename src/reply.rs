//! Template replies keyed on the active triggers. Used whenever no language
//! model phrases the answer.

use crate::triggers::{Trigger, TriggerSet};

pub const DEFAULT_REPLY: &str =
    "Thank you for sharing. I'm here with you. Would a sip of water or some quiet time help?";

/// First matching rule wins: pain, confusion, overwhelm/environment,
/// loneliness/anxiety, routine, physiology.
pub fn make_reply(triggers: &TriggerSet) -> &'static str {
    let on = |t| triggers.get(t);
    if on(Trigger::Pain) {
        "I'm sorry you're uncomfortable. Would a short sit and some water help right now?"
    } else if on(Trigger::Confusion) {
        "You're safe. We are at home together. Would you like me to remind you what's next?"
    } else if on(Trigger::Overwhelm) || on(Trigger::Environment) {
        "Let's slow down. We can move to a quieter, softer space. Would that help?"
    } else if on(Trigger::Loneliness) || on(Trigger::Anxiety) {
        "I'm here with you. Would you like to listen to a favorite song or call someone?"
    } else if on(Trigger::Routine) {
        "Let's try one small step at a time. Would you like an easy first step?"
    } else if on(Trigger::Physiology) {
        "Let's check comfort. Would a sip of water or a bathroom break help?"
    } else {
        DEFAULT_REPLY
    }
}
